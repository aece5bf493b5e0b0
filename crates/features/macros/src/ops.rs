use revive_kernel::bridge::{CapabilityDescriptor, Operation};

pub const GET: Operation = Operation::new("macros.get", &["macros_get"]);
pub const SET_ENABLED: Operation = Operation::new("macros.set_enabled", &["macros_set_enabled"]);
pub const SET_RUN_ALWAYS: Operation = Operation::new("macros.set_run_always", &["macros_set_run_always"]);
pub const SET_DELAY: Operation = Operation::new("macros.set_delay", &["macros_set_delay"]);
pub const SET_DURATION: Operation = Operation::new("macros.set_duration", &["macros_set_duration"]);
pub const SET_ROWS: Operation = Operation::new("macros.set_rows", &["macros_set_rows"]);
/// Older hosts only store the key sequence.
pub const SET_SEQUENCE: Operation = Operation::new("macros.set_sequence", &["macros_set_sequence"]);
pub const RUN_ONCE: Operation = Operation::new("macros.run_once", &["macros_run_once"]);

pub fn descriptor() -> CapabilityDescriptor {
    CapabilityDescriptor::new(
        "macros",
        1,
        [GET, SET_ENABLED, SET_RUN_ALWAYS, SET_DELAY, SET_DURATION, SET_ROWS, SET_SEQUENCE, RUN_ONCE],
    )
}
