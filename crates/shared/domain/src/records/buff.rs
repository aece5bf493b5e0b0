use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuffConfig {
    pub enabled: bool,
    pub mode: String,
    pub method: String,
    pub methods: Vec<String>,
}

impl Default for BuffConfig {
    fn default() -> Self {
        Self { enabled: false, mode: "profile".to_owned(), method: String::new(), methods: Vec::new() }
    }
}

impl BuffConfig {
    /// Replaces the method list, keeping `current` when listed, else the first method.
    pub fn replace_methods(&mut self, methods: Vec<String>, current: &str) {
        self.method = if methods.iter().any(|m| m == current) {
            current.to_owned()
        } else {
            methods.first().cloned().unwrap_or_default()
        };
        self.methods = methods;
    }
}
