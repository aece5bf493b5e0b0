use revive_kernel::bridge::{CapabilityDescriptor, Operation};

pub const GET_WAIT_CONFIG: Operation = Operation::new("respawn.get_wait_config", &["respawn_get_wait_config"]);
pub const SET_ENABLED: Operation = Operation::new("respawn.set_enabled", &["respawn_set_enabled"]);
pub const SET_WAIT_ENABLED: Operation = Operation::new("respawn.set_wait_enabled", &["respawn_set_wait_enabled"]);
pub const SET_WAIT_SECONDS: Operation = Operation::new("respawn.set_wait_seconds", &["respawn_set_wait_seconds"]);

pub fn descriptor() -> CapabilityDescriptor {
    CapabilityDescriptor::new("respawn", 1, [GET_WAIT_CONFIG, SET_ENABLED, SET_WAIT_ENABLED, SET_WAIT_SECONDS])
}
