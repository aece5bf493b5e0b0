use crate::ops;
use revive_kernel::bridge::{Call, Operation, PushStep, Value, json};
use revive_kernel::domain::constants::DEFAULT_AUTOFARM_MODES;
use revive_kernel::domain::features::FeatureId;
use revive_kernel::domain::records::{AutofarmConfig, AutofarmView, SkillSlot};
use revive_kernel::sync::sanitize::{hotbar_key, ident};
use revive_kernel::sync::{Cadence, FeatureSchema};

pub const MISSING_PROFESSION: &str = "Select a profession";
pub const MISSING_SKILL: &str = "Add an attack skill";
pub const MISSING_ZONE: &str = "Select a zone";

/// A local edit to the auto-farm panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutofarmPatch {
    Enabled(bool),
    Mode(String),
    /// Switching profession drops the skills bound for the previous one.
    Profession(String),
    /// Switching zone drops the monster selection.
    Zone(String),
    Monsters(Vec<String>),
    Skills(Vec<SkillSlot>),
    Skill { index: usize, slot: SkillSlot },
    AddSkill,
    RemoveSkill,
    /// Explicit save: validated, then pushed without waiting for the debounce window.
    Save,
}

/// Declared in flush order: the config lands before a mode switch or a start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AutofarmGroup {
    Config,
    ConfigNow,
    Mode,
    Enabled,
}

#[derive(Debug, Default)]
pub struct AutofarmSchema;

/// Checks that a config is complete enough to start farming.
///
/// # Errors
/// The first missing piece, as a user-facing message.
pub fn validate(config: &AutofarmConfig) -> Result<(), &'static str> {
    if config.profession.is_empty() {
        return Err(MISSING_PROFESSION);
    }
    if !config.skills.iter().any(|s| !s.key.is_empty() && !s.slug.is_empty() && s.cast_ms > 0) {
        return Err(MISSING_SKILL);
    }
    if config.zone.is_empty() {
        return Err(MISSING_ZONE);
    }
    Ok(())
}

impl FeatureSchema for AutofarmSchema {
    type View = AutofarmView;
    type Patch = AutofarmPatch;
    type Group = AutofarmGroup;

    const FEATURE: FeatureId = FeatureId::Autofarm;

    fn snapshot(&self) -> Option<Operation> {
        Some(ops::GET)
    }

    fn decode(&self, payload: Value) -> Option<AutofarmView> {
        if payload.get("ok").and_then(Value::as_bool) == Some(false) {
            return None;
        }
        serde_json::from_value(payload).ok()
    }

    fn settle(&self, view: &mut AutofarmView) {
        if view.modes.is_empty() {
            view.modes = DEFAULT_AUTOFARM_MODES.iter().map(|m| (*m).to_owned()).collect();
        }
        if view.mode.is_empty() {
            view.mode = DEFAULT_AUTOFARM_MODES[0].to_owned();
        }
        view.config.skills = sanitize_skills(std::mem::take(&mut view.config.skills));
    }

    fn apply(&self, view: &mut AutofarmView, patch: AutofarmPatch) -> Result<AutofarmGroup, String> {
        let config = &mut view.config;
        let group = match patch {
            AutofarmPatch::Enabled(enabled) => {
                if enabled {
                    validate(config)?;
                }
                view.enabled = enabled;
                AutofarmGroup::Enabled
            },
            AutofarmPatch::Mode(mode) => {
                let mode = ident(&mode);
                if !view.modes.contains(&mode) {
                    return Err(format!("Unknown mode '{mode}'"));
                }
                view.mode = mode;
                AutofarmGroup::Mode
            },
            AutofarmPatch::Profession(profession) => {
                let profession = ident(&profession);
                if profession != config.profession {
                    config.profession = profession;
                    config.skills = vec![SkillSlot::default()];
                }
                AutofarmGroup::Config
            },
            AutofarmPatch::Zone(zone) => {
                let zone = ident(&zone);
                if zone != config.zone {
                    config.zone = zone;
                    config.monsters.clear();
                }
                AutofarmGroup::Config
            },
            AutofarmPatch::Monsters(monsters) => {
                let mut unique: Vec<String> = Vec::with_capacity(monsters.len());
                for monster in monsters.iter().map(|m| ident(m)).filter(|m| !m.is_empty()) {
                    if !unique.contains(&monster) {
                        unique.push(monster);
                    }
                }
                config.monsters = unique;
                AutofarmGroup::Config
            },
            AutofarmPatch::Skills(skills) => {
                config.skills = sanitize_skills(skills);
                AutofarmGroup::Config
            },
            AutofarmPatch::Skill { index, slot } => {
                let target = config.skills.get_mut(index).ok_or_else(|| format!("No skill slot {}", index + 1))?;
                *target = sanitize_skill(slot);
                AutofarmGroup::Config
            },
            AutofarmPatch::AddSkill => {
                config.skills.push(SkillSlot::default());
                AutofarmGroup::Config
            },
            AutofarmPatch::RemoveSkill => {
                if config.skills.len() <= 1 {
                    return Err("At least one skill slot is required".to_owned());
                }
                config.skills.pop();
                AutofarmGroup::Config
            },
            AutofarmPatch::Save => {
                validate(config)?;
                AutofarmGroup::ConfigNow
            },
        };
        Ok(group)
    }

    fn cadence(&self, group: AutofarmGroup) -> Cadence {
        match group {
            AutofarmGroup::Config => Cadence::Debounced,
            AutofarmGroup::Enabled | AutofarmGroup::Mode | AutofarmGroup::ConfigNow => Cadence::Immediate,
        }
    }

    fn supersedes(&self, group: AutofarmGroup) -> Vec<AutofarmGroup> {
        match group {
            AutofarmGroup::ConfigNow => vec![AutofarmGroup::Config],
            _ => Vec::new(),
        }
    }

    fn requires(&self, group: AutofarmGroup) -> Vec<AutofarmGroup> {
        match group {
            AutofarmGroup::Enabled => vec![AutofarmGroup::Config, AutofarmGroup::Mode],
            _ => Vec::new(),
        }
    }

    fn push(&self, view: &AutofarmView, group: AutofarmGroup) -> Vec<PushStep> {
        let step = match group {
            AutofarmGroup::Enabled if view.enabled => PushStep::sequence(
                "autofarm.enable",
                vec![Call::new(ops::SET_MODE, vec![json!(view.mode)]), Call::new(ops::SET_ENABLED, vec![json!(true)])],
            )
            .or(vec![Call::new(ops::START, vec![json!(view.mode)])]),
            AutofarmGroup::Enabled => PushStep::call("autofarm.disable", ops::SET_ENABLED, vec![json!(false)])
                .or(vec![Call::new(ops::STOP, Vec::new())]),
            AutofarmGroup::Mode => PushStep::call("autofarm.mode", ops::SET_MODE, vec![json!(view.mode)]),
            AutofarmGroup::Config | AutofarmGroup::ConfigNow => {
                PushStep::call("autofarm.config", ops::SAVE, vec![json!(view.config)])
            },
        };
        vec![step]
    }
}

fn sanitize_skill(slot: SkillSlot) -> SkillSlot {
    SkillSlot {
        key: hotbar_key(&slot.key).unwrap_or_else(|| SkillSlot::default().key),
        slug: ident(&slot.slug),
        ..slot
    }
}

/// Sanitized slots; never empty.
fn sanitize_skills(skills: Vec<SkillSlot>) -> Vec<SkillSlot> {
    let skills: Vec<SkillSlot> = skills.into_iter().map(sanitize_skill).collect();
    if skills.is_empty() { vec![SkillSlot::default()] } else { skills }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_config() -> AutofarmConfig {
        AutofarmConfig {
            profession: "spellsinger".to_owned(),
            skills: vec![SkillSlot { slug: "hydro_blast".to_owned(), ..SkillSlot::default() }],
            zone: "cruma_tower".to_owned(),
            monsters: vec!["porta".to_owned()],
        }
    }

    #[test]
    fn validation_reports_the_first_missing_piece() {
        let mut config = AutofarmConfig::default();
        assert_eq!(validate(&config), Err(MISSING_PROFESSION));
        config.profession = "spellsinger".to_owned();
        assert_eq!(validate(&config), Err(MISSING_SKILL));
        config.skills[0].slug = "hydro_blast".to_owned();
        config.skills[0].cast_ms = 0;
        assert_eq!(validate(&config), Err(MISSING_SKILL));
        config.skills[0].cast_ms = 1200;
        assert_eq!(validate(&config), Err(MISSING_ZONE));
        assert!(validate(&ready_config()).is_ok());
    }

    #[test]
    fn failed_snapshot_reply_is_not_a_view() {
        assert_eq!(AutofarmSchema.decode(json!({"ok": false, "error": "no server"})), None);
        let view = AutofarmSchema.decode(json!({"ok": true, "enabled": true, "mode": "manual"})).unwrap();
        assert!(view.enabled);
        assert_eq!(view.mode, "manual");
    }

    #[test]
    fn settle_restores_modes_and_skills() {
        let mut view = AutofarmView { mode: String::new(), modes: Vec::new(), ..AutofarmView::default() };
        view.config.skills.clear();
        AutofarmSchema.settle(&mut view);
        assert_eq!(view.modes, vec!["auto", "manual"]);
        assert_eq!(view.mode, "auto");
        assert_eq!(view.config.skills, vec![SkillSlot::default()]);
    }

    #[test]
    fn profession_and_zone_changes_reset_dependents() {
        let mut view = AutofarmView { config: ready_config(), ..AutofarmView::default() };
        AutofarmSchema.apply(&mut view, AutofarmPatch::Zone("cruma_tower".to_owned())).unwrap();
        assert_eq!(view.config.monsters, vec!["porta"]);

        AutofarmSchema.apply(&mut view, AutofarmPatch::Zone("dragon_valley".to_owned())).unwrap();
        assert!(view.config.monsters.is_empty());
        AutofarmSchema.apply(&mut view, AutofarmPatch::Profession("bladedancer".to_owned())).unwrap();
        assert_eq!(view.config.skills, vec![SkillSlot::default()]);
    }

    #[test]
    fn skill_edits_are_sanitized() {
        let mut view = AutofarmView::default();
        let slot = SkillSlot { key: "F5".to_owned(), slug: " wind_strike ".to_owned(), ..SkillSlot::default() };
        AutofarmSchema.apply(&mut view, AutofarmPatch::Skill { index: 0, slot }).unwrap();
        assert_eq!(view.config.skills[0].key, "1");
        assert_eq!(view.config.skills[0].slug, "wind_strike");
        assert!(AutofarmSchema.apply(&mut view, AutofarmPatch::RemoveSkill).is_err());
        assert!(AutofarmSchema.apply(&mut view, AutofarmPatch::Skill { index: 3, slot: SkillSlot::default() }).is_err());
        assert!(AutofarmSchema.apply(&mut view, AutofarmPatch::Mode("turbo".to_owned())).is_err());

        AutofarmSchema
            .apply(&mut view, AutofarmPatch::Monsters(vec!["orc".into(), " orc".into(), String::new(), "imp".into()]))
            .unwrap();
        assert_eq!(view.config.monsters, vec!["orc", "imp"]);
    }

    #[test]
    fn enabling_falls_back_to_start() {
        let view = AutofarmView { enabled: true, mode: "manual".to_owned(), ..AutofarmView::default() };
        let steps = AutofarmSchema.push(&view, AutofarmGroup::Enabled);
        assert_eq!(steps[0].alternatives.len(), 2);
        assert_eq!(steps[0].alternatives[0].len(), 2);
        assert_eq!(steps[0].alternatives[1], vec![Call::new(ops::START, vec![json!("manual")])]);
    }
}
