use revive_kernel::bridge::{CapabilityDescriptor, Operation};

pub const SET_ENABLED: Operation =
    Operation::new("monitor.set_enabled", &["watcher_set_enabled", "respawn_set_monitoring"]);
/// `state_last` answers `{hp_ratio}` instead of `{hp, cp, alive}`.
pub const STATE_SNAPSHOT: Operation = Operation::new("monitor.state", &["get_state_snapshot", "state_last"]);
pub const IS_RUNNING: Operation = Operation::new("monitor.is_running", &["watcher_is_running"]);

pub fn descriptor() -> CapabilityDescriptor {
    CapabilityDescriptor::new("monitor", 1, [SET_ENABLED, STATE_SNAPSHOT, IS_RUNNING])
}
