//! Store-wide operations not owned by any single feature.

use revive_bridge::{CapabilityDescriptor, Operation};

pub const INIT_STATE: Operation = Operation::new("init_state", &["get_init_state"]);
pub const APP_VERSION: Operation = Operation::new("app_version", &["app_version"]);
pub const SET_SERVER: Operation = Operation::new("set_server", &["set_server"]);
pub const SET_LANGUAGE: Operation = Operation::new("set_language", &["set_language"]);

pub const DESCRIPTOR_VERSION: u32 = 1;

pub fn descriptor() -> CapabilityDescriptor {
    CapabilityDescriptor::new("core", DESCRIPTOR_VERSION, [INIT_STATE, APP_VERSION, SET_SERVER, SET_LANGUAGE])
}
