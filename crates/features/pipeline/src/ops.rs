use revive_kernel::bridge::{CapabilityDescriptor, Operation};

pub const GET_ORDER: Operation = Operation::new("pipeline.get_order", &["pipeline_get_order"]);
pub const SET_ORDER: Operation = Operation::new("pipeline.set_order", &["pipeline_set_order"]);
pub const SET_ENABLED: Operation = Operation::new("pipeline.set_enabled", &["pipeline_set_enabled"]);

pub fn descriptor() -> CapabilityDescriptor {
    CapabilityDescriptor::new("pipeline", 1, [GET_ORDER, SET_ORDER, SET_ENABLED])
}
