use crate::records::RespawnConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status line as the store reports it: `ok` drives colouring, `None` is neutral.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverStatus {
    pub text: String,
    pub ok: Option<bool>,
}

/// `get_init_state` dump. Used for context (server, language) and as a hydration fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitState {
    pub version: String,
    pub language: String,
    pub server: String,
    pub servers: Vec<String>,
    pub window_found: bool,
    pub monitoring: bool,
    pub buff_methods: Vec<String>,
    pub buff_current: String,
    #[serde(alias = "tp_methods")]
    pub teleport_methods: Vec<String>,
    pub respawn: Option<RespawnConfig>,
    pub sections: BTreeMap<String, bool>,
    pub driver_status: DriverStatus,
}
