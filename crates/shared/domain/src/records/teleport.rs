use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    pub enabled: bool,
    pub method: String,
    pub category: String,
    pub location: String,
    pub stabilize: bool,
}

/// Display row pushed by the store (`onRows`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RowEntry {
    pub id: String,
    pub title: String,
}

/// Teleport panel: persisted config plus display-only lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportView {
    #[serde(flatten)]
    pub config: TeleportConfig,
    pub methods: Vec<String>,
    pub rows: Vec<RowEntry>,
    pub selected_row: Option<String>,
}
