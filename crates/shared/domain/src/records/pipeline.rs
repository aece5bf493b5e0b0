use crate::constants::{DEFAULT_ALLOWED_STAGES, DEFAULT_ORDER};
use serde::{Deserialize, Serialize};

/// Post-death action order. `allowed` is server-declared and read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOrder {
    pub enabled: bool,
    pub order: Vec<String>,
    pub allowed: Vec<String>,
}

impl Default for PipelineOrder {
    fn default() -> Self {
        Self {
            enabled: true,
            order: DEFAULT_ORDER.iter().map(|s| (*s).to_owned()).collect(),
            allowed: DEFAULT_ALLOWED_STAGES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}
