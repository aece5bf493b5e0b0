use crate::constants::DEFAULT_RESPAWN_WAIT_SECONDS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    pub enabled: bool,
    pub wait_enabled: bool,
    pub wait_seconds: u32,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self { enabled: false, wait_enabled: false, wait_seconds: DEFAULT_RESPAWN_WAIT_SECONDS }
    }
}

/// `respawn_get_wait_config` payload: `enabled` there is the *wait* toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnWaitConfig {
    pub enabled: bool,
    pub seconds: u32,
    pub respawn_enabled: bool,
}

impl Default for RespawnWaitConfig {
    fn default() -> Self {
        RespawnConfig::default().into()
    }
}

impl From<RespawnWaitConfig> for RespawnConfig {
    fn from(wire: RespawnWaitConfig) -> Self {
        Self { enabled: wire.respawn_enabled, wait_enabled: wire.enabled, wait_seconds: wire.seconds }
    }
}

impl From<RespawnConfig> for RespawnWaitConfig {
    fn from(config: RespawnConfig) -> Self {
        Self { enabled: config.wait_enabled, seconds: config.wait_seconds, respawn_enabled: config.enabled }
    }
}
