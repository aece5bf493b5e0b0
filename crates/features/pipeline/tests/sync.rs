use revive_bridge::BridgeHandle;
use revive_bridge::memory::MemoryHost;
use revive_kernel::domain::config::SyncConfig;
use revive_kernel::domain::state::CommitOutcome;
use revive_kernel::sync::{Lifecycle, NotificationSink, SyncContext};
use revive_pipeline::Pipeline;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn store() -> MemoryHost {
    MemoryHost::new(json!({
        "pipeline": {"enabled": true, "order": ["respawn"], "allowed": ["respawn", "macros", "buff"]}
    }))
        .with_value("get_init_state", json!({}))
        .with_read("pipeline_get_order", "/pipeline")
        .with_write("pipeline_set_order", "/pipeline/order")
        .with_write("pipeline_set_enabled", "/pipeline/enabled")
}

async fn boot(host: MemoryHost) -> (Pipeline, Arc<MemoryHost>) {
    let host = Arc::new(host);
    let ctx = SyncContext::new(BridgeHandle::default(), NotificationSink::default(), SyncConfig::default());
    let pipeline = revive_pipeline::init(&ctx).unwrap();
    host.attach_to(&ctx.bridge);
    pipeline.boot().await;
    (pipeline, host)
}

#[tokio::test(start_paused = true)]
async fn loaded_order_gains_missing_allowed_stages_without_push() {
    let (pipeline, host) = boot(store()).await;

    assert_eq!(pipeline.get_order().order, vec!["respawn", "macros", "buff"]);
    assert_eq!(pipeline.reorderable(), vec!["macros", "buff"]);
    sleep(Duration::from_millis(5)).await;
    assert_eq!(host.call_count("pipeline_set_order"), 0);
}

#[tokio::test(start_paused = true)]
async fn set_order_is_normalized_before_push() {
    let (pipeline, host) = boot(store()).await;

    pipeline.set_order(vec!["buff".to_owned(), "tp".to_owned(), "buff".to_owned(), "macros".to_owned()]);
    sleep(Duration::from_millis(5)).await;
    assert_eq!(host.tree_value("/pipeline/order"), Some(json!(["respawn", "buff", "macros"])));

    assert_eq!(pipeline.move_stage(1, 0), CommitOutcome::Accepted);
    assert!(matches!(pipeline.move_stage(2, 0), CommitOutcome::Rejected { .. }));
    sleep(Duration::from_millis(5)).await;
    assert_eq!(host.tree_value("/pipeline/order"), Some(json!(["respawn", "macros", "buff"])));
}

#[tokio::test(start_paused = true)]
async fn missing_getter_falls_back_to_default_order() {
    let old = store();
    old.remove("pipeline_get_order");
    let (pipeline, _) = boot(old).await;

    let view = pipeline.get_order();
    assert!(view.enabled);
    assert_eq!(view.order, vec!["respawn", "macros", "buff", "tp", "autofarm"]);
}
