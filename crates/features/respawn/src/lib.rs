//! Respawn feature slice: auto-respawn toggle and the wait-for-resurrection window.

mod error;
pub mod ops;
mod schema;

pub use crate::error::{RespawnError, RespawnErrorExt};
pub use crate::schema::{RespawnGroup, RespawnPatch, RespawnSchema};

use revive_kernel::domain::records::RespawnConfig;
use revive_kernel::domain::state::CommitOutcome;
use revive_kernel::sync::sanitize::seconds;
use revive_kernel::sync::{FeatureModule, SyncContext};
use tracing::info;

#[revive_derive::revive_slice(Respawn)]
pub struct Respawn {
    pub module: FeatureModule<RespawnSchema>,
}

impl Respawn {
    pub fn view(&self) -> RespawnConfig {
        self.module.view()
    }

    pub fn set_enabled(&self, enabled: bool) -> CommitOutcome {
        self.module.commit(RespawnPatch::Enabled(enabled))
    }

    pub fn set_wait_enabled(&self, enabled: bool) -> CommitOutcome {
        self.module.commit(RespawnPatch::WaitEnabled(enabled))
    }

    pub fn set_wait_seconds(&self, seconds: i64) -> CommitOutcome {
        self.module.commit(RespawnPatch::WaitSeconds(seconds))
    }

    /// Text field variant: fractions are rounded, garbage counts as `0`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_wait_seconds_text(&self, text: &str) -> CommitOutcome {
        self.set_wait_seconds(seconds(text).round() as i64)
    }
}

/// Initialize the respawn feature.
///
/// # Errors
/// Fails outside a tokio runtime.
pub fn init(ctx: &SyncContext) -> Result<Respawn, RespawnError> {
    ctx.bridge.register(ops::descriptor());
    let module = FeatureModule::new(RespawnSchema, ctx.bridge.clone(), &ctx.config).context("respawn module")?;
    info!("Respawn slice initialized");
    Ok(Respawn::new(RespawnInner { module }))
}
