use revive_bridge::{Operation, PushStep};
use revive_domain::features::FeatureId;
use revive_domain::init_state::InitState;
use serde_json::Value;
use std::fmt::Debug;

/// When a dirty edit group is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Discrete toggles: pushed on the next driver turn.
    Immediate,
    /// High-frequency edits: pushed after a quiet period; every edit restarts the window.
    Debounced,
}

/// A feature's contribution to the synchronization protocol.
///
/// The module calls these hooks; schemas never talk to the bridge themselves.
pub trait FeatureSchema: Debug + Send + Sync + 'static {
    type View: Clone + Default + Debug + PartialEq + Send + Sync + 'static;
    type Patch: Debug + Send;
    type Group: Copy + Ord + Debug + Send + Sync + 'static;

    const FEATURE: FeatureId;
    /// Whether hydration falls back to the `get_init_state` dump.
    const INIT_FALLBACK: bool = false;

    /// Snapshot getter; `None` for features hydrated from the init dump only.
    fn snapshot(&self) -> Option<Operation> {
        None
    }

    fn snapshot_args(&self) -> Vec<Value> {
        Vec::new()
    }

    fn decode(&self, payload: Value) -> Option<Self::View>;

    fn from_init(&self, _init: &InitState) -> Option<Self::View> {
        None
    }

    /// Normalizes a freshly hydrated view (defaults, load-time repairs).
    fn settle(&self, _view: &mut Self::View) {}

    /// Sanitizes `patch` into `view` and names the edit group it dirtied.
    ///
    /// `Err` rejects the edit with a reason; the caller discards `view`.
    fn apply(&self, view: &mut Self::View, patch: Self::Patch) -> Result<Self::Group, String>;

    fn cadence(&self, _group: Self::Group) -> Cadence {
        Cadence::Immediate
    }

    /// Pending groups dropped when `group` is scheduled; its push already carries their state.
    fn supersedes(&self, _group: Self::Group) -> Vec<Self::Group> {
        Vec::new()
    }

    /// Pending groups that must reach the store no later than `group`.
    ///
    /// Groups flush in `Ord` order, so each of these must order before `group`.
    fn requires(&self, _group: Self::Group) -> Vec<Self::Group> {
        Vec::new()
    }

    /// Copies store-pushed fields from the view being replaced into a freshly hydrated one.
    ///
    /// Notification-only data (row lists, method pools) is not part of any snapshot, and the
    /// store does not resend it after a context switch.
    fn carry(&self, _previous: &Self::View, _next: &mut Self::View) {}

    /// Store calls for `group`, built from the current view at flush time.
    fn push(&self, view: &Self::View, group: Self::Group) -> Vec<PushStep>;
}
