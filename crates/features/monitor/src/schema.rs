use crate::ops;
use revive_kernel::bridge::{PushStep, Value, json};
use revive_kernel::domain::features::FeatureId;
use revive_kernel::domain::init_state::InitState;
use revive_kernel::domain::records::{MonitorView, StateSnapshot};
use revive_kernel::sync::FeatureSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPatch {
    Enabled(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MonitorGroup {
    Enabled,
}

/// Watcher toggle. Hydrated from the init dump only; the rest of the view is mirrored.
#[derive(Debug, Default)]
pub struct MonitorSchema;

impl FeatureSchema for MonitorSchema {
    type View = MonitorView;
    type Patch = MonitorPatch;
    type Group = MonitorGroup;

    const FEATURE: FeatureId = FeatureId::Monitor;
    const INIT_FALLBACK: bool = true;

    fn decode(&self, payload: Value) -> Option<MonitorView> {
        serde_json::from_value(payload).ok()
    }

    fn from_init(&self, init: &InitState) -> Option<MonitorView> {
        Some(MonitorView { enabled: init.monitoring, ..MonitorView::default() })
    }

    fn apply(&self, view: &mut MonitorView, patch: MonitorPatch) -> Result<MonitorGroup, String> {
        let MonitorPatch::Enabled(enabled) = patch;
        view.enabled = enabled;
        Ok(MonitorGroup::Enabled)
    }

    fn push(&self, view: &MonitorView, _group: MonitorGroup) -> Vec<PushStep> {
        vec![PushStep::call("monitor.enabled", ops::SET_ENABLED, vec![json!(view.enabled)])]
    }
}

/// Reads either snapshot shape. Unknown fields stay `None`.
pub fn decode_state(payload: &Value) -> StateSnapshot {
    if let Some(ratio) = payload.get("hp_ratio").and_then(Value::as_f64) {
        return StateSnapshot { hp: Some(percent(ratio)), cp: None, alive: payload.get("alive").and_then(Value::as_bool) };
    }
    serde_json::from_value(payload.clone()).unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(ratio: f64) -> u8 {
    if ratio.is_finite() { (ratio * 100.0).round().clamp(0.0, 100.0) as u8 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_ratio_becomes_percent() {
        assert_eq!(decode_state(&json!({"hp_ratio": 0.456})).hp, Some(46));
        assert_eq!(decode_state(&json!({"hp_ratio": 3.0})).hp, Some(100));
        assert_eq!(decode_state(&json!({"hp_ratio": -1.0})).hp, Some(0));
    }

    #[test]
    fn snapshot_shape_and_garbage() {
        let state = decode_state(&json!({"hp": 80, "cp": 100, "alive": true}));
        assert_eq!(state, StateSnapshot { hp: Some(80), cp: Some(100), alive: Some(true) });
        assert_eq!(decode_state(&json!("nope")), StateSnapshot::default());
        assert_eq!(decode_state(&json!({"hp": null, "cp": null, "alive": null})), StateSnapshot::default());
    }

    #[test]
    fn toggle_comes_from_init_dump() {
        let init = InitState { monitoring: true, ..InitState::default() };
        assert!(MonitorSchema.from_init(&init).unwrap().enabled);
    }
}
