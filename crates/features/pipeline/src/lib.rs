//! Post-death action ordering.
//!
//! `respawn` always runs first and cannot be dragged. The allow-set is declared by the store
//! and read-only here.

mod error;
pub mod ops;
pub mod ordering;
mod schema;

pub use crate::error::{PipelineError, PipelineErrorExt};
pub use crate::schema::{PipelineGroup, PipelinePatch, PipelineSchema};

use revive_kernel::domain::records::PipelineOrder;
use revive_kernel::domain::state::CommitOutcome;
use revive_kernel::sync::{FeatureModule, SyncContext};
use tracing::info;

#[revive_derive::revive_slice(Pipeline)]
pub struct Pipeline {
    pub module: FeatureModule<PipelineSchema>,
}

impl Pipeline {
    pub fn get_order(&self) -> PipelineOrder {
        self.module.view()
    }

    pub fn set_enabled(&self, enabled: bool) -> CommitOutcome {
        self.module.commit(PipelinePatch::Enabled(enabled))
    }

    /// Replaces the order. The pinned stage is re-prepended and unknown or repeated stages dropped.
    pub fn set_order(&self, order: Vec<String>) -> CommitOutcome {
        self.module.commit(PipelinePatch::Order(order))
    }

    pub fn reorderable(&self) -> Vec<String> {
        ordering::reorderable(&self.module.view().order).to_vec()
    }

    pub fn move_stage(&self, from: usize, to: usize) -> CommitOutcome {
        self.module.commit(PipelinePatch::Move { from, to })
    }
}

/// Initialize the pipeline feature.
///
/// # Errors
/// Fails outside a tokio runtime.
pub fn init(ctx: &SyncContext) -> Result<Pipeline, PipelineError> {
    ctx.bridge.register(ops::descriptor());
    let module = FeatureModule::new(PipelineSchema, ctx.bridge.clone(), &ctx.config).context("pipeline module")?;
    info!("Pipeline slice initialized");
    Ok(Pipeline::new(PipelineInner { module }))
}
