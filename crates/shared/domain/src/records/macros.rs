use serde::{Deserialize, Serialize};

/// One macro step: press `key`, wait `cast_s`, repeat every `repeat_s` (0 = once).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroRow {
    pub key: String,
    pub cast_s: f64,
    pub repeat_s: f64,
}

impl Default for MacroRow {
    fn default() -> Self {
        Self { key: "1".to_owned(), cast_s: 0.0, repeat_s: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacrosConfig {
    pub enabled: bool,
    pub run_always: bool,
    pub delay_s: f64,
    pub duration_s: f64,
    pub rows: Vec<MacroRow>,
}

impl Default for MacrosConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            run_always: false,
            delay_s: 1.0,
            duration_s: 0.0,
            rows: vec![MacroRow::default()],
        }
    }
}

impl MacrosConfig {
    /// Key sequence for hosts that only understand `macros_set_sequence`.
    #[must_use]
    pub fn sequence(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.key.clone()).collect()
    }
}
