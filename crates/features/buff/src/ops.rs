use revive_kernel::bridge::{CapabilityDescriptor, Operation};

pub const GET_CONFIG: Operation = Operation::new("buff.get_config", &["buff_get_config"]);
pub const SET_ENABLED: Operation = Operation::new("buff.set_enabled", &["buff_set_enabled"]);
pub const SET_MODE: Operation = Operation::new("buff.set_mode", &["buff_set_mode"]);
pub const SET_METHOD: Operation = Operation::new("buff.set_method", &["buff_set_method"]);
pub const RUN_ONCE: Operation = Operation::new("buff.run_once", &["buff_run_once"]);
pub const CHECKER_GET: Operation = Operation::new("buff.checker_get", &["buff_checker_get"]);
pub const CHECKER_SET: Operation = Operation::new("buff.checker_set", &["buff_checker_set"]);

pub fn descriptor() -> CapabilityDescriptor {
    CapabilityDescriptor::new(
        "buff",
        2,
        [GET_CONFIG, SET_ENABLED, SET_MODE, SET_METHOD, RUN_ONCE, CHECKER_GET, CHECKER_SET],
    )
}
