use serde::{Deserialize, Serialize};

/// Reply of a one-shot action (`macros_run_once`, `buff_run_once`, `teleport_run_now`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Store-side refusal code, e.g. `disabled` or `no_target`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl OpReply {
    #[must_use]
    pub const fn success() -> Self {
        Self { ok: true, error: None, reason: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { ok: false, error: Some(error.into()), reason: None }
    }

    pub fn refused(reason: impl Into<String>) -> Self {
        Self { ok: false, error: None, reason: Some(reason.into()) }
    }

    /// Human readable cause of a failed reply.
    #[must_use]
    pub fn cause(&self) -> Option<&str> {
        self.error.as_deref().or(self.reason.as_deref())
    }
}

/// Older hosts answer one-shot actions with a bare boolean.
impl From<bool> for OpReply {
    fn from(ok: bool) -> Self {
        if ok { Self::success() } else { Self::refused("failed") }
    }
}
