use crate::ops;
use revive_kernel::bridge::{Operation, PushStep, Value, json};
use revive_kernel::domain::features::FeatureId;
use revive_kernel::domain::init_state::InitState;
use revive_kernel::domain::records::{RespawnConfig, RespawnWaitConfig};
use revive_kernel::sync::{Cadence, FeatureSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnPatch {
    Enabled(bool),
    WaitEnabled(bool),
    /// Negative values clamp to `0`.
    WaitSeconds(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RespawnGroup {
    Enabled,
    WaitEnabled,
    WaitSeconds,
}

#[derive(Debug, Default)]
pub struct RespawnSchema;

impl FeatureSchema for RespawnSchema {
    type View = RespawnConfig;
    type Patch = RespawnPatch;
    type Group = RespawnGroup;

    const FEATURE: FeatureId = FeatureId::Respawn;
    const INIT_FALLBACK: bool = true;

    fn snapshot(&self) -> Option<Operation> {
        Some(ops::GET_WAIT_CONFIG)
    }

    fn decode(&self, payload: Value) -> Option<RespawnConfig> {
        serde_json::from_value::<RespawnWaitConfig>(payload).ok().map(Into::into)
    }

    fn from_init(&self, init: &InitState) -> Option<RespawnConfig> {
        init.respawn.clone()
    }

    fn apply(&self, view: &mut RespawnConfig, patch: RespawnPatch) -> Result<RespawnGroup, String> {
        let group = match patch {
            RespawnPatch::Enabled(enabled) => {
                view.enabled = enabled;
                RespawnGroup::Enabled
            },
            RespawnPatch::WaitEnabled(enabled) => {
                view.wait_enabled = enabled;
                RespawnGroup::WaitEnabled
            },
            RespawnPatch::WaitSeconds(seconds) => {
                view.wait_seconds = u32::try_from(seconds.max(0)).unwrap_or(u32::MAX);
                RespawnGroup::WaitSeconds
            },
        };
        Ok(group)
    }

    fn cadence(&self, group: RespawnGroup) -> Cadence {
        match group {
            RespawnGroup::Enabled | RespawnGroup::WaitEnabled => Cadence::Immediate,
            RespawnGroup::WaitSeconds => Cadence::Debounced,
        }
    }

    fn push(&self, view: &RespawnConfig, group: RespawnGroup) -> Vec<PushStep> {
        let step = match group {
            RespawnGroup::Enabled => PushStep::call("respawn.enabled", ops::SET_ENABLED, vec![json!(view.enabled)]),
            RespawnGroup::WaitEnabled => {
                PushStep::call("respawn.wait_enabled", ops::SET_WAIT_ENABLED, vec![json!(view.wait_enabled)])
            },
            RespawnGroup::WaitSeconds => {
                PushStep::call("respawn.wait_seconds", ops::SET_WAIT_SECONDS, vec![json!(view.wait_seconds)])
            },
        };
        vec![step]
    }
}
