//! Notifications pushed by the store outside request/response.

use crate::records::RowEntry;
use serde::{Deserialize, Serialize};

/// `onStatus({scope, text, ok})`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    pub scope: String,
    pub text: String,
    pub ok: Option<bool>,
}

impl Status {
    pub fn new(scope: impl Into<String>, text: impl Into<String>, ok: Option<bool>) -> Self {
        Self { scope: scope.into(), text: text.into(), ok }
    }

    #[must_use]
    pub const fn tone(&self) -> StatusTone {
        match self.ok {
            Some(true) => StatusTone::Ok,
            Some(false) => StatusTone::Error,
            None => StatusTone::Neutral,
        }
    }
}

/// Colouring of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Ok,
    Error,
    Neutral,
}

/// `onRows(list)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowsUpdated(pub Vec<RowEntry>);

/// `onRowSelected(id)`; `None` clears the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSelected(pub Option<String>);

/// `onBuffMethods(methods, current)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuffMethods {
    pub methods: Vec<String>,
    pub current: String,
}
