//! Teleport feature slice.
//!
//! Config edits are discrete selections and push immediately. The rows list and the selected
//! row are display state pushed by the store (`onRows`, `onRowSelected`).

mod error;
pub mod ops;
mod schema;

pub use crate::error::{TeleportError, TeleportErrorExt};
pub use crate::schema::{TeleportGroup, TeleportPatch, TeleportSchema};

use revive_kernel::bridge::{Operation, Value, json};
use revive_kernel::domain::notify::{RowSelected, RowsUpdated};
use revive_kernel::domain::records::TeleportView;
use revive_kernel::domain::reply::OpReply;
use revive_kernel::domain::state::CommitOutcome;
use revive_kernel::sync::{FeatureModule, SyncContext, fetch_init_state};
use tracing::{debug, info};

#[revive_derive::revive_slice(Teleport, after_boot = refresh_methods, after_hydrate = refresh_methods)]
pub struct Teleport {
    pub module: FeatureModule<TeleportSchema>,
}

impl Teleport {
    pub fn view(&self) -> TeleportView {
        self.module.view()
    }

    pub fn set_enabled(&self, enabled: bool) -> CommitOutcome {
        self.module.commit(TeleportPatch::Enabled(enabled))
    }

    pub fn set_method(&self, method: &str) -> CommitOutcome {
        self.module.commit(TeleportPatch::Method(method.to_owned()))
    }

    pub fn set_category(&self, category: &str) -> CommitOutcome {
        self.module.commit(TeleportPatch::Category(category.to_owned()))
    }

    pub fn set_location(&self, location: &str) -> CommitOutcome {
        self.module.commit(TeleportPatch::Location(location.to_owned()))
    }

    pub fn set_stabilize(&self, stabilize: bool) -> CommitOutcome {
        self.module.commit(TeleportPatch::Stabilize(stabilize))
    }

    /// Selects a location and turns stabilize on when the store says the location offers it.
    pub async fn select_location(&self, location: &str) -> CommitOutcome {
        let outcome = self.set_location(location);
        let location = self.view().config.location;
        if !outcome.is_accepted() || location.is_empty() {
            return outcome;
        }
        let optional = match self.module.bridge().call(&ops::HAS_OPTIONAL_STABILIZE, vec![json!(location)]).await {
            Ok(reply) => reply.as_bool().unwrap_or_default(),
            Err(e) => {
                debug!(%location, error = %e, "Stabilize availability unknown");
                false
            },
        };
        if optional != self.view().config.stabilize {
            self.set_stabilize(optional);
        }
        outcome
    }

    pub fn select_row(&self, row: Option<&str>) -> CommitOutcome {
        self.module.commit(TeleportPatch::Row(row.map(str::to_owned)))
    }

    /// Teleports now. The store refuses with `disabled` or `no_target`.
    pub async fn run_now(&self) -> OpReply {
        self.module.bridge().call_soft(&ops::RUN_NOW, Vec::new()).await
    }

    pub async fn categories(&self) -> Vec<String> {
        self.list(&ops::CATEGORIES, Vec::new()).await
    }

    pub async fn locations(&self, category: &str) -> Vec<String> {
        self.list(&ops::LOCATIONS, vec![json!(category)]).await
    }

    async fn list(&self, op: &Operation, args: Vec<Value>) -> Vec<String> {
        self.module.bridge().call_as::<Vec<String>>(op, args).await.unwrap_or_else(|e| {
            debug!(op = op.key, error = %e, "Lookup failed");
            Vec::new()
        })
    }

    /// Method pool comes from the init dump, not the config getter.
    async fn refresh_methods(&self) {
        match fetch_init_state(self.module.bridge()).await {
            Ok(init) => self.module.apply_remote(|view| view.methods = init.teleport_methods),
            Err(e) => debug!(error = %e, "Teleport methods unavailable"),
        }
    }
}

/// Initialize the teleport feature and subscribe it to row notifications.
///
/// # Errors
/// Fails outside a tokio runtime.
pub fn init(ctx: &SyncContext) -> Result<Teleport, TeleportError> {
    ctx.bridge.register(ops::descriptor());
    let module = FeatureModule::new(TeleportSchema, ctx.bridge.clone(), &ctx.config).context("teleport module")?;
    module
        .follow(ctx.events(), |view: &mut TeleportView, rows: &RowsUpdated| view.rows.clone_from(&rows.0))
        .context("teleport rows")?;
    module
        .follow(ctx.events(), |view: &mut TeleportView, selected: &RowSelected| {
            view.selected_row.clone_from(&selected.0);
        })
        .context("teleport row selection")?;
    info!("Teleport slice initialized");
    Ok(Teleport::new(TeleportInner { module }))
}
