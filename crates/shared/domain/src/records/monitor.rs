use super::lenient::LooseNumber;
use serde::{Deserialize, Serialize};

/// `get_state_snapshot` payload. Fields are `None` when the watcher has no reading.
///
/// Percentages are rounded and clamped to `0..=100`; an unreadable one is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStateSnapshot")]
pub struct StateSnapshot {
    pub hp: Option<u8>,
    pub cp: Option<u8>,
    pub alive: Option<bool>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawStateSnapshot {
    hp: Option<LooseNumber>,
    cp: Option<LooseNumber>,
    alive: Option<bool>,
}

impl From<RawStateSnapshot> for StateSnapshot {
    fn from(raw: RawStateSnapshot) -> Self {
        let percent = |v: Option<LooseNumber>| v.and_then(|v| v.clamped(100)).and_then(|p| u8::try_from(p).ok());
        Self { hp: percent(raw.hp), cp: percent(raw.cp), alive: raw.alive }
    }
}

/// Watcher panel. `enabled` is the user's toggle; the rest is mirrored, never pushed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorView {
    pub enabled: bool,
    pub running: Option<bool>,
    pub hp_percent: Option<u8>,
    pub alive: Option<bool>,
}
