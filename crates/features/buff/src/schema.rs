use crate::ops;
use revive_kernel::bridge::{Operation, PushStep, Value, json};
use revive_kernel::domain::features::FeatureId;
use revive_kernel::domain::init_state::InitState;
use revive_kernel::domain::records::BuffConfig;
use revive_kernel::sync::sanitize::ident;
use revive_kernel::sync::{Cadence, FeatureSchema};

pub const DEFAULT_MODE: &str = "profile";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuffPatch {
    Enabled(bool),
    /// Lowercased; empty falls back to `profile`.
    Mode(String),
    Method(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuffGroup {
    Enabled,
    Mode,
    Method,
}

#[derive(Debug, Default)]
pub struct BuffSchema;

fn mode(raw: &str) -> String {
    let mode = ident(raw).to_lowercase();
    if mode.is_empty() { DEFAULT_MODE.to_owned() } else { mode }
}

impl FeatureSchema for BuffSchema {
    type View = BuffConfig;
    type Patch = BuffPatch;
    type Group = BuffGroup;

    const FEATURE: FeatureId = FeatureId::Buff;
    const INIT_FALLBACK: bool = true;

    fn snapshot(&self) -> Option<Operation> {
        Some(ops::GET_CONFIG)
    }

    fn decode(&self, payload: Value) -> Option<BuffConfig> {
        serde_json::from_value(payload).ok()
    }

    fn from_init(&self, init: &InitState) -> Option<BuffConfig> {
        let mut config = BuffConfig::default();
        config.replace_methods(init.buff_methods.clone(), &init.buff_current);
        Some(config)
    }

    fn settle(&self, view: &mut BuffConfig) {
        view.mode = mode(&view.mode);
    }

    /// The pool arrives through `onBuffMethods`; a getter reply without one keeps the last pool.
    fn carry(&self, previous: &BuffConfig, next: &mut BuffConfig) {
        if next.methods.is_empty() && !previous.methods.is_empty() {
            let current = if next.method.is_empty() { previous.method.clone() } else { next.method.clone() };
            next.replace_methods(previous.methods.clone(), &current);
        }
    }

    fn apply(&self, view: &mut BuffConfig, patch: BuffPatch) -> Result<BuffGroup, String> {
        let group = match patch {
            BuffPatch::Enabled(enabled) => {
                view.enabled = enabled;
                BuffGroup::Enabled
            },
            BuffPatch::Mode(raw) => {
                view.mode = mode(&raw);
                BuffGroup::Mode
            },
            BuffPatch::Method(method) => {
                let method = ident(&method);
                if !view.methods.is_empty() && !view.methods.contains(&method) {
                    return Err(format!("Unknown buff method '{method}'"));
                }
                view.method = method;
                BuffGroup::Method
            },
        };
        Ok(group)
    }

    fn cadence(&self, _group: BuffGroup) -> Cadence {
        Cadence::Immediate
    }

    fn push(&self, view: &BuffConfig, group: BuffGroup) -> Vec<PushStep> {
        let step = match group {
            BuffGroup::Enabled => PushStep::call("buff.enabled", ops::SET_ENABLED, vec![json!(view.enabled)]),
            BuffGroup::Mode => PushStep::call("buff.mode", ops::SET_MODE, vec![json!(view.mode)]),
            BuffGroup::Method => PushStep::call("buff.method", ops::SET_METHOD, vec![json!(view.method)]),
        };
        vec![step]
    }
}
