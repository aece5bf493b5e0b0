//! Facade crate for the Revive control surface.
//! Re-exports domain/kernel primitives and aggregates feature slice initialization.
//! Keep this crate thin: it composes the slices, it does not implement sync logic.
//!
//! ## Usage
//! - Build a [`ControlSurface`] from a [`SurfaceConfig`] ([`ControlSurface::from_config`]), or
//!   from a [`BridgeHandle`] built elsewhere.
//! - Hand [`ControlSurface::notifier`] to the host so store notifications reach the slices.
//! - Call [`ControlSurface::boot`]; every enabled slice waits for the bridge and hydrates.

mod error;

pub use crate::error::{SurfaceError, SurfaceErrorExt};
pub use revive_bridge as bridge;
pub use revive_domain as domain;
pub use revive_kernel as kernel;

use parking_lot::RwLock;
use revive_bridge::{BridgeHandle, HostNotifier};
use revive_domain::config::SurfaceConfig;
use revive_domain::features::{FeatureId, FeatureSet};
use revive_domain::init_state::InitState;
use revive_domain::notify::Status;
use revive_domain::registry::{FeatureSlice, InitializedSlice};
use revive_domain::state::HydrationState;
use revive_kernel::ops;
use revive_kernel::sync::{Lifecycle, NotificationSink, StatusBoard, SyncContext, fetch_init_state};
use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Feature slices by name.
pub mod features {
    pub use revive_autofarm as autofarm;
    pub use revive_buff as buff;
    pub use revive_macros as macros;
    pub use revive_monitor as monitor;
    pub use revive_pipeline as pipeline;
    pub use revive_respawn as respawn;
    pub use revive_teleport as teleport;
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Boot,
    Rehydrate,
}

/// The assembled control surface: one slice per enabled feature over a shared bridge.
#[derive(Debug)]
pub struct ControlSurface {
    ctx: SyncContext,
    features: FeatureSet,
    slices: Vec<InitializedSlice>,
    lifecycles: Vec<Arc<dyn Lifecycle>>,
    init: RwLock<Option<InitState>>,
}

impl ControlSurface {
    /// Registers the store descriptors and initializes every feature in `config.features`.
    ///
    /// # Errors
    /// Returns an error if any feature initialization fails (outside a tokio runtime).
    pub fn new(bridge: BridgeHandle, config: &SurfaceConfig) -> Result<Self, SurfaceError> {
        bridge.register(ops::descriptor());
        let ctx = SyncContext::new(bridge, NotificationSink::default(), config.sync.clone());
        let mut surface =
            Self { ctx, features: config.features, slices: Vec::new(), lifecycles: Vec::new(), init: RwLock::new(None) };

        for feature in FeatureId::ALL {
            if !config.features.has(feature) {
                continue;
            }
            match feature {
                FeatureId::Macros => surface.add(features::macros::init(&surface.ctx)?),
                FeatureId::Autofarm => surface.add(features::autofarm::init(&surface.ctx)?),
                FeatureId::Teleport => surface.add(features::teleport::init(&surface.ctx)?),
                FeatureId::Respawn => surface.add(features::respawn::init(&surface.ctx)?),
                FeatureId::Buff => surface.add(features::buff::init(&surface.ctx)?),
                FeatureId::Monitor => surface.add(features::monitor::init(&surface.ctx)?),
                FeatureId::Pipeline => surface.add(features::pipeline::init(&surface.ctx)?),
            }
        }
        info!(features = ?surface.enabled(), "Control surface assembled");
        Ok(surface)
    }

    /// [`ControlSurface::new`] over a bridge tuned by `config.bridge`.
    ///
    /// # Errors
    /// Returns an error if any feature initialization fails (outside a tokio runtime).
    pub fn from_config(config: &SurfaceConfig) -> Result<Self, SurfaceError> {
        Self::new(BridgeHandle::new(&config.bridge), config)
    }

    fn add<T: FeatureSlice + Lifecycle + Clone>(&mut self, slice: T) {
        self.lifecycles.push(Arc::new(slice.clone()));
        self.slices.push(InitializedSlice::new(slice));
    }

    pub fn bridge(&self) -> &BridgeHandle {
        &self.ctx.bridge
    }

    pub fn sink(&self) -> &NotificationSink {
        &self.ctx.sink
    }

    /// Host-facing notification entry points.
    pub fn notifier(&self) -> Arc<dyn HostNotifier> {
        Arc::new(self.ctx.sink.clone())
    }

    pub fn status_board(&self) -> &StatusBoard {
        self.ctx.sink.board()
    }

    pub fn status(&self, scope: &str) -> Option<Status> {
        self.status_board().get(scope)
    }

    pub fn enabled(&self) -> Vec<FeatureId> {
        self.slices.iter().map(|s| s.feature).collect()
    }

    pub const fn features(&self) -> FeatureSet {
        self.features
    }

    /// A slice by its concrete type, e.g. `surface.slice::<Macros>()`.
    pub fn slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.slices.iter().find_map(InitializedSlice::downcast::<T>)
    }

    pub fn hydration(&self) -> Vec<(FeatureId, HydrationState)> {
        self.lifecycles.iter().map(|l| (l.feature(), l.hydration())).collect()
    }

    pub fn is_live(&self) -> bool {
        self.lifecycles.iter().all(|l| l.hydration().is_live())
    }

    /// Last `get_init_state` dump, once booted.
    pub fn init_state(&self) -> Option<InitState> {
        self.init.read().clone()
    }

    /// Waits for the bridge, reads the init dump and hydrates every slice.
    pub async fn boot(&self) {
        self.ctx.bridge.ready().await;
        self.refresh_init_state().await;
        self.each_slice(Stage::Boot).await;
        info!(features = self.lifecycles.len(), "Control surface live");
    }

    /// Switches the store to another server and re-hydrates every slice.
    ///
    /// # Errors
    /// The store call failed; local state is untouched.
    pub async fn set_server(&self, server: &str) -> Result<(), SurfaceError> {
        self.ctx.bridge.call(&ops::SET_SERVER, vec![json!(server)]).await.context("set_server")?;
        info!(server, "Server switched");
        self.rehydrate().await;
        Ok(())
    }

    /// Switches the store language and re-hydrates every slice.
    ///
    /// # Errors
    /// The store call failed; local state is untouched.
    pub async fn set_language(&self, language: &str) -> Result<(), SurfaceError> {
        self.ctx.bridge.call(&ops::SET_LANGUAGE, vec![json!(language)]).await.context("set_language")?;
        info!(language, "Language switched");
        self.rehydrate().await;
        Ok(())
    }

    /// Store version string, when the host exposes one.
    pub async fn app_version(&self) -> Option<String> {
        self.ctx.bridge.call_as::<String>(&ops::APP_VERSION, Vec::new()).await.ok()
    }

    pub async fn rehydrate(&self) {
        self.refresh_init_state().await;
        self.each_slice(Stage::Rehydrate).await;
    }

    /// Runs `stage` on every slice at once; a slice stuck on the store holds up only itself.
    async fn each_slice(&self, stage: Stage) {
        let mut tasks = JoinSet::new();
        for slice in &self.lifecycles {
            let slice = Arc::clone(slice);
            tasks.spawn(async move {
                match stage {
                    Stage::Boot => slice.boot().await,
                    Stage::Rehydrate => slice.rehydrate().await,
                }
            });
        }
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, ?stage, "Slice task ended abnormally");
            }
        }
    }

    async fn refresh_init_state(&self) {
        match fetch_init_state(&self.ctx.bridge).await {
            Ok(init) => *self.init.write() = Some(init),
            Err(e) => warn!(error = %e, "Init state unavailable"),
        }
    }
}
