use crate::features::FeatureSet;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level control surface configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SurfaceConfigInner {
    pub bridge: BridgeConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
    pub features: FeatureSet,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct SurfaceConfig {
    #[serde(flatten, default)]
    inner: Arc<SurfaceConfigInner>,
}

impl Deref for SurfaceConfig {
    type Target = SurfaceConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SurfaceConfig {
    fn deref_mut(&mut self) -> &mut SurfaceConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Readiness gate tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub poll_interval_ms: u64,
    /// Poll attempts before the fallback gives up; the host event can still open the gate.
    pub max_attempts: u32,
    /// Operation that must be exposed before the bridge counts as ready.
    pub required_operation: Option<String>,
}

/// Mutation pipeline and mirror timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub debounce_ms: u64,
    pub mirror_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Extra `tracing` directives, e.g. `revive_kernel=debug`.
    pub filter: Option<String>,
    /// Rolling file sink directory; console only when absent.
    pub directory: Option<PathBuf>,
    pub json: bool,
}

/// Initial store context; the store's own values are kept when absent.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub server: Option<String>,
    pub language: Option<String>,
}

impl BridgeConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl SyncConfig {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn mirror_interval(&self) -> Duration {
        Duration::from_millis(self.mirror_interval_ms)
    }
}

// --- Default ---

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { poll_interval_ms: 50, max_attempts: 160, required_operation: Some("get_init_state".to_owned()) }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { debounce_ms: 250, mirror_interval_ms: 2000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, directory: None, json: false }
    }
}
