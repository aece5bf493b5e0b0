use crate::ops::INIT_STATE;
use crate::sync::schema::FeatureSchema;
use revive_bridge::{BridgeError, BridgeHandle};
use revive_domain::init_state::InitState;
use serde_json::Value;
use tracing::{debug, warn};

/// Fetches the full `get_init_state` dump.
pub async fn fetch_init_state(bridge: &BridgeHandle) -> Result<InitState, BridgeError> {
    bridge.call_as(&INIT_STATE, Vec::new()).await
}

/// Loads a view: snapshot getter, then the init dump, then defaults. Never fails.
pub(crate) async fn load<S: FeatureSchema>(schema: &S, bridge: &BridgeHandle) -> S::View {
    let mut view = match snapshot(schema, bridge).await {
        Some(view) => view,
        None => fallback(schema, bridge).await.unwrap_or_default(),
    };
    schema.settle(&mut view);
    view
}

async fn snapshot<S: FeatureSchema>(schema: &S, bridge: &BridgeHandle) -> Option<S::View> {
    let op = schema.snapshot()?;
    match bridge.call(&op, schema.snapshot_args()).await {
        Ok(Value::Null) => {
            debug!(feature = %S::FEATURE, op = op.key, "Snapshot empty");
            None
        },
        Ok(payload) => {
            let view = schema.decode(payload);
            if view.is_none() {
                warn!(feature = %S::FEATURE, op = op.key, "Snapshot payload not decodable");
            }
            view
        },
        Err(e) => {
            warn!(feature = %S::FEATURE, op = op.key, error = %e, "Snapshot fetch failed");
            None
        },
    }
}

async fn fallback<S: FeatureSchema>(schema: &S, bridge: &BridgeHandle) -> Option<S::View> {
    if !S::INIT_FALLBACK {
        return None;
    }
    match fetch_init_state(bridge).await {
        Ok(init) => schema.from_init(&init),
        Err(e) => {
            warn!(feature = %S::FEATURE, error = %e, "Init state fallback failed");
            None
        },
    }
}
