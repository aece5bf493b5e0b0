//! Buff feature slice. The method pool is owned by the store and replaced by `onBuffMethods`.
//!
//! The checker selection lives outside the synced config: it is read and written on demand.

pub mod checker;
mod error;
pub mod ops;
mod schema;

pub use crate::error::{BuffError, BuffErrorExt};
pub use crate::schema::{BuffGroup, BuffPatch, BuffSchema, DEFAULT_MODE};

use revive_kernel::bridge::json;
use revive_kernel::domain::notify::BuffMethods;
use revive_kernel::domain::records::BuffConfig;
use revive_kernel::domain::reply::OpReply;
use revive_kernel::domain::state::CommitOutcome;
use revive_kernel::sync::{FeatureModule, SyncContext};
use tracing::{debug, info};

#[revive_derive::revive_slice(Buff)]
pub struct Buff {
    pub module: FeatureModule<BuffSchema>,
}

impl Buff {
    pub fn view(&self) -> BuffConfig {
        self.module.view()
    }

    pub fn set_enabled(&self, enabled: bool) -> CommitOutcome {
        self.module.commit(BuffPatch::Enabled(enabled))
    }

    pub fn set_mode(&self, mode: &str) -> CommitOutcome {
        self.module.commit(BuffPatch::Mode(mode.to_owned()))
    }

    pub fn set_method(&self, method: &str) -> CommitOutcome {
        self.module.commit(BuffPatch::Method(method.to_owned()))
    }

    /// Buffs once now. Older hosts answer with a bare boolean.
    pub async fn run_once(&self) -> OpReply {
        self.module.bridge().call_soft(&ops::RUN_ONCE, Vec::new()).await
    }

    /// Buffs the store checks after a run. Empty when the host has no checker.
    pub async fn checker(&self) -> Vec<String> {
        match self.module.bridge().call_as::<Vec<String>>(&ops::CHECKER_GET, Vec::new()).await {
            Ok(keys) => checker::selection(&keys),
            Err(e) => {
                debug!(error = %e, "Buff checker unavailable");
                Vec::new()
            },
        }
    }

    /// Replaces the checked buffs and returns the selection as sent.
    ///
    /// # Errors
    /// The store call failed.
    pub async fn set_checker<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<String>, BuffError> {
        let keys = checker::selection(keys);
        if let Some(unknown) = keys.iter().find(|k| !checker::is_known(k)) {
            debug!(key = %unknown, "Buff checker key outside the catalogue");
        }
        self.module.bridge().call(&ops::CHECKER_SET, vec![json!(keys)]).await.context("buff checker")?;
        info!(count = keys.len(), "Buff checker updated");
        Ok(keys)
    }
}

/// Initialize the buff feature and subscribe it to method list updates.
///
/// # Errors
/// Fails outside a tokio runtime.
pub fn init(ctx: &SyncContext) -> Result<Buff, BuffError> {
    ctx.bridge.register(ops::descriptor());
    let module = FeatureModule::new(BuffSchema, ctx.bridge.clone(), &ctx.config).context("buff module")?;
    module
        .follow(ctx.events(), |view: &mut BuffConfig, update: &BuffMethods| {
            view.replace_methods(update.methods.clone(), &update.current);
        })
        .context("buff methods")?;
    info!("Buff slice initialized");
    Ok(Buff::new(BuffInner { module }))
}
