//! Auto-farm feature slice.
//!
//! Profession, attack skills, zone and monsters are one debounced config group saved through
//! whichever save entry point the host exposes. Enabling requires a complete config; a
//! rejected enable is reported on the `autofarm` status scope.

mod error;
pub mod ops;
mod schema;

pub use crate::error::{AutofarmError, AutofarmErrorExt};
pub use crate::schema::{
    AutofarmGroup, AutofarmPatch, AutofarmSchema, MISSING_PROFESSION, MISSING_SKILL, MISSING_ZONE, validate,
};

use revive_kernel::bridge::{Operation, Value, json};
use revive_kernel::domain::constants::AUTOFARM;
use revive_kernel::domain::notify::Status;
use revive_kernel::domain::records::{AutofarmView, SkillSlot};
use revive_kernel::domain::state::CommitOutcome;
use revive_kernel::sync::{FeatureModule, NotificationSink, SyncContext};
use tracing::{debug, info};

#[revive_derive::revive_slice(Autofarm)]
pub struct Autofarm {
    pub module: FeatureModule<AutofarmSchema>,
    pub sink: NotificationSink,
}

impl Autofarm {
    pub fn view(&self) -> AutofarmView {
        self.module.view()
    }

    /// Starts or stops farming. Enabling an incomplete config is rejected and the reason
    /// posted as a warning status.
    pub fn set_enabled(&self, enabled: bool) -> CommitOutcome {
        let outcome = self.module.commit(AutofarmPatch::Enabled(enabled));
        if let CommitOutcome::Rejected { reason } = &outcome {
            self.sink.on_status(Status::new(AUTOFARM, reason.clone(), Some(false)));
        }
        outcome
    }

    pub fn set_mode(&self, mode: &str) -> CommitOutcome {
        self.module.commit(AutofarmPatch::Mode(mode.to_owned()))
    }

    pub fn set_profession(&self, profession: &str) -> CommitOutcome {
        self.module.commit(AutofarmPatch::Profession(profession.to_owned()))
    }

    pub fn set_zone(&self, zone: &str) -> CommitOutcome {
        self.module.commit(AutofarmPatch::Zone(zone.to_owned()))
    }

    pub fn set_monsters(&self, monsters: Vec<String>) -> CommitOutcome {
        self.module.commit(AutofarmPatch::Monsters(monsters))
    }

    pub fn set_skills(&self, skills: Vec<SkillSlot>) -> CommitOutcome {
        self.module.commit(AutofarmPatch::Skills(skills))
    }

    pub fn set_skill(&self, index: usize, slot: SkillSlot) -> CommitOutcome {
        self.module.commit(AutofarmPatch::Skill { index, slot })
    }

    pub fn add_skill(&self) -> CommitOutcome {
        self.module.commit(AutofarmPatch::AddSkill)
    }

    pub fn remove_skill(&self) -> CommitOutcome {
        self.module.commit(AutofarmPatch::RemoveSkill)
    }

    pub fn save(&self) -> CommitOutcome {
        let outcome = self.module.commit(AutofarmPatch::Save);
        if let CommitOutcome::Rejected { reason } = &outcome {
            self.sink.on_status(Status::new(AUTOFARM, reason.clone(), Some(false)));
        }
        outcome
    }

    pub async fn professions(&self, language: &str) -> Vec<Value> {
        self.list(&ops::PROFESSIONS, vec![json!(language)]).await
    }

    pub async fn attack_skills(&self, profession: &str, language: &str) -> Vec<Value> {
        self.list(&ops::ATTACK_SKILLS, vec![json!(profession), json!(language)]).await
    }

    pub async fn zones(&self, language: &str) -> Vec<Value> {
        self.list(&ops::ZONES, vec![json!(language)]).await
    }

    /// Zone details for the info popup; `None` when unavailable.
    pub async fn zone_info(&self, zone: &str, language: &str) -> Option<Value> {
        match self.module.bridge().call(&ops::ZONE_INFO, vec![json!(zone), json!(language)]).await {
            Ok(Value::Null) => None,
            Ok(info) => Some(info),
            Err(e) => {
                debug!(zone, error = %e, "Zone info unavailable");
                None
            },
        }
    }

    /// Catalog lookup; empty on any failure or non-list reply.
    async fn list(&self, op: &Operation, args: Vec<Value>) -> Vec<Value> {
        match self.module.bridge().call(op, args).await {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                debug!(op = op.key, reply = %other, "Lookup returned a non-list");
                Vec::new()
            },
            Err(e) => {
                debug!(op = op.key, error = %e, "Lookup failed");
                Vec::new()
            },
        }
    }
}

/// Initialize the auto-farm feature.
///
/// # Errors
/// Fails outside a tokio runtime.
pub fn init(ctx: &SyncContext) -> Result<Autofarm, AutofarmError> {
    ctx.bridge.register(ops::descriptor());
    let module = FeatureModule::new(AutofarmSchema, ctx.bridge.clone(), &ctx.config).context("autofarm module")?;
    info!("Autofarm slice initialized");
    Ok(Autofarm::new(AutofarmInner { module, sink: ctx.sink.clone() }))
}
