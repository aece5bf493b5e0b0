use crate::{ops, ordering};
use revive_kernel::bridge::{Operation, PushStep, Value, json};
use revive_kernel::domain::constants::DEFAULT_ALLOWED_STAGES;
use revive_kernel::domain::features::FeatureId;
use revive_kernel::domain::records::PipelineOrder;
use revive_kernel::sync::FeatureSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelinePatch {
    Enabled(bool),
    Order(Vec<String>),
    Move { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineGroup {
    Enabled,
    Order,
}

#[derive(Debug, Default)]
pub struct PipelineSchema;

impl FeatureSchema for PipelineSchema {
    type View = PipelineOrder;
    type Patch = PipelinePatch;
    type Group = PipelineGroup;

    const FEATURE: FeatureId = FeatureId::Pipeline;

    fn snapshot(&self) -> Option<Operation> {
        Some(ops::GET_ORDER)
    }

    fn decode(&self, payload: Value) -> Option<PipelineOrder> {
        serde_json::from_value(payload).ok()
    }

    fn settle(&self, view: &mut PipelineOrder) {
        if view.allowed.is_empty() {
            view.allowed = DEFAULT_ALLOWED_STAGES.iter().map(|s| (*s).to_owned()).collect();
        }
        view.allowed = ordering::allow_set(&view.allowed);
        view.order = ordering::complete(&view.order, &view.allowed);
    }

    fn apply(&self, view: &mut PipelineOrder, patch: PipelinePatch) -> Result<PipelineGroup, String> {
        let group = match patch {
            PipelinePatch::Enabled(enabled) => {
                view.enabled = enabled;
                PipelineGroup::Enabled
            },
            PipelinePatch::Order(order) => {
                view.order = ordering::normalize(&order, &view.allowed);
                PipelineGroup::Order
            },
            PipelinePatch::Move { from, to } => {
                view.order = ordering::move_stage(&view.order, from, to)?;
                PipelineGroup::Order
            },
        };
        Ok(group)
    }

    fn push(&self, view: &PipelineOrder, group: PipelineGroup) -> Vec<PushStep> {
        let step = match group {
            PipelineGroup::Enabled => PushStep::call("pipeline.enabled", ops::SET_ENABLED, vec![json!(view.enabled)]),
            PipelineGroup::Order => PushStep::call("pipeline.order", ops::SET_ORDER, vec![json!(view.order)]),
        };
        vec![step]
    }
}
