//! Macros feature slice: key rows pressed after respawn, with timing and a run-once action.

mod error;
pub mod ops;
mod schema;

pub use crate::error::{MacrosError, MacrosErrorExt};
pub use crate::schema::{MacrosGroup, MacrosPatch, MacrosSchema};

use revive_kernel::domain::records::{MacroRow, MacrosConfig};
use revive_kernel::domain::reply::OpReply;
use revive_kernel::domain::state::CommitOutcome;
use revive_kernel::sync::sanitize::seconds;
use revive_kernel::sync::{FeatureModule, SyncContext};
use tracing::info;

/// Macros feature state
#[revive_derive::revive_slice(Macros)]
pub struct Macros {
    pub module: FeatureModule<MacrosSchema>,
}

impl Macros {
    pub fn view(&self) -> MacrosConfig {
        self.module.view()
    }

    pub fn set_enabled(&self, enabled: bool) -> CommitOutcome {
        self.module.commit(MacrosPatch::Enabled(enabled))
    }

    pub fn set_run_always(&self, run_always: bool) -> CommitOutcome {
        self.module.commit(MacrosPatch::RunAlways(run_always))
    }

    pub fn set_delay(&self, seconds: f64) -> CommitOutcome {
        self.module.commit(MacrosPatch::Delay(seconds))
    }

    /// Text field variant; anything unparsable counts as `0`.
    pub fn set_delay_text(&self, text: &str) -> CommitOutcome {
        self.set_delay(seconds(text))
    }

    pub fn set_duration(&self, seconds: f64) -> CommitOutcome {
        self.module.commit(MacrosPatch::Duration(seconds))
    }

    pub fn set_duration_text(&self, text: &str) -> CommitOutcome {
        self.set_duration(seconds(text))
    }

    pub fn set_rows(&self, rows: Vec<MacroRow>) -> CommitOutcome {
        self.module.commit(MacrosPatch::Rows(rows))
    }

    pub fn set_row(&self, index: usize, row: MacroRow) -> CommitOutcome {
        self.module.commit(MacrosPatch::Row { index, row })
    }

    pub fn add_row(&self) -> CommitOutcome {
        self.module.commit(MacrosPatch::AddRow)
    }

    pub fn remove_row(&self) -> CommitOutcome {
        self.module.commit(MacrosPatch::RemoveRow)
    }

    /// Runs the configured rows once, outside the respawn pipeline.
    pub async fn run_once(&self) -> OpReply {
        self.module.bridge().call_soft(&ops::RUN_ONCE, Vec::new()).await
    }
}

/// Initialize the macros feature.
///
/// # Errors
/// Fails outside a tokio runtime.
pub fn init(ctx: &SyncContext) -> Result<Macros, MacrosError> {
    ctx.bridge.register(ops::descriptor());
    let module = FeatureModule::new(MacrosSchema, ctx.bridge.clone(), &ctx.config).context("macros module")?;
    info!("Macros slice initialized");
    Ok(Macros::new(MacrosInner { module }))
}
