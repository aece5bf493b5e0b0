use super::lenient::LooseNumber;
use crate::constants::{DEFAULT_AUTOFARM_MODES, DEFAULT_CAST_MS};
use serde::{Deserialize, Serialize};

/// Attack skill slot. Deserializes older payloads that used `cd_ms`/`cooldown`, and falls back
/// to the cast time when no cooldown was stored. Timings are rounded and clamped at zero;
/// unreadable ones take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSkillSlot")]
pub struct SkillSlot {
    pub key: String,
    pub slug: String,
    pub cast_ms: u32,
    pub cooldown_ms: u32,
}

impl Default for SkillSlot {
    fn default() -> Self {
        Self { key: "1".to_owned(), slug: String::new(), cast_ms: DEFAULT_CAST_MS, cooldown_ms: DEFAULT_CAST_MS }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawSkillSlot {
    key: String,
    slug: String,
    cast_ms: Option<LooseNumber>,
    #[serde(alias = "cd_ms", alias = "cooldown")]
    cooldown_ms: Option<LooseNumber>,
}

impl Default for RawSkillSlot {
    fn default() -> Self {
        Self { key: "1".to_owned(), slug: String::new(), cast_ms: None, cooldown_ms: None }
    }
}

impl From<RawSkillSlot> for SkillSlot {
    fn from(raw: RawSkillSlot) -> Self {
        let cast_ms = raw.cast_ms.and_then(|v| v.clamped(u32::MAX)).unwrap_or(DEFAULT_CAST_MS);
        Self {
            key: if raw.key.is_empty() { "1".to_owned() } else { raw.key },
            slug: raw.slug,
            cast_ms,
            cooldown_ms: raw.cooldown_ms.and_then(|v| v.clamped(u32::MAX)).unwrap_or(cast_ms),
        }
    }
}

/// Auto-farm settings saved through `autofarm_save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofarmConfig {
    pub profession: String,
    pub skills: Vec<SkillSlot>,
    pub zone: String,
    pub monsters: Vec<String>,
}

impl Default for AutofarmConfig {
    fn default() -> Self {
        Self { profession: String::new(), skills: vec![SkillSlot::default()], zone: String::new(), monsters: Vec::new() }
    }
}

/// `autofarm_get` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofarmView {
    pub enabled: bool,
    pub mode: String,
    pub modes: Vec<String>,
    pub config: AutofarmConfig,
}

impl Default for AutofarmView {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: DEFAULT_AUTOFARM_MODES[0].to_owned(),
            modes: DEFAULT_AUTOFARM_MODES.iter().map(|m| (*m).to_owned()).collect(),
            config: AutofarmConfig::default(),
        }
    }
}
