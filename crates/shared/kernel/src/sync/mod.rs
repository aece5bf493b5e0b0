//! Bridge-readiness and state-synchronization protocol.
//!
//! * [`schema`]: what a feature contributes (decode, sanitize, edit groups, push steps).
//! * [`module`]: the per-feature state machine (hydration guard, debounce, single push in flight).
//! * [`hydration`]: snapshot fetch with init-dump fallback.
//! * [`mirror`]: read-only polling loop for transient state.
//! * [`sink`]: store notifications onto the event bus and the status board.

pub mod hydration;
pub mod mirror;
pub mod module;
pub mod sanitize;
pub mod schema;
pub mod sink;

pub use hydration::fetch_init_state;
pub use mirror::PollingMirror;
pub use module::{FeatureModule, Lifecycle};
pub use schema::{Cadence, FeatureSchema};
pub use sink::{NotificationSink, StatusBoard};

use revive_bridge::BridgeHandle;
use revive_domain::config::SyncConfig;
use revive_event_bus::EventBus;

/// Everything a feature slice needs at init.
#[derive(Debug, Clone)]
pub struct SyncContext {
    pub bridge: BridgeHandle,
    pub sink: NotificationSink,
    pub config: SyncConfig,
}

impl SyncContext {
    pub fn new(bridge: BridgeHandle, sink: NotificationSink, config: SyncConfig) -> Self {
        Self { bridge, sink, config }
    }

    pub fn events(&self) -> &EventBus {
        self.sink.events()
    }
}
