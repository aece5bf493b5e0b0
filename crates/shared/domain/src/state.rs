use serde::{Deserialize, Serialize};

/// Lifecycle of the call bridge. `Ready` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeState {
    #[default]
    Unknown,
    Waiting,
    Ready,
}

/// Per-feature hydration lifecycle. Commits are only accepted while `Live`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HydrationState {
    #[default]
    Idle,
    Hydrating,
    Live,
}

impl HydrationState {
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

/// Result of submitting a local edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Applied to the view and scheduled for push.
    Accepted,
    /// Dropped because the feature is not live yet (boot or re-hydration in progress).
    Suppressed,
    /// Refused by feature rules; the view is unchanged.
    Rejected { reason: String },
}

impl CommitOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}
