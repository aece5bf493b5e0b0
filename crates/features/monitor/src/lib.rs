//! Monitor feature slice.
//!
//! The watcher toggle is pushed like any edit. Health and run status are mirrored by a
//! polling loop that never writes back; once no toggle is pending the mirrored run status
//! also confirms the toggle.

mod error;
pub mod ops;
mod schema;

pub use crate::error::{MonitorError, MonitorErrorExt};
pub use crate::schema::{MonitorGroup, MonitorPatch, MonitorSchema, decode_state};

use revive_kernel::bridge::{BridgeError, Value};
use revive_kernel::domain::records::MonitorView;
use revive_kernel::domain::state::CommitOutcome;
use revive_kernel::sync::{FeatureModule, PollingMirror, SyncContext};
use std::time::Duration;
use tracing::{debug, info};

#[revive_derive::revive_slice(Monitor, after_boot = resume_mirror)]
pub struct Monitor {
    pub module: FeatureModule<MonitorSchema>,
    pub mirror: PollingMirror,
    pub every: Duration,
}

impl Monitor {
    pub fn view(&self) -> MonitorView {
        self.module.view()
    }

    pub fn set_enabled(&self, enabled: bool) -> CommitOutcome {
        self.module.commit(MonitorPatch::Enabled(enabled))
    }

    /// Starts the mirror at the configured interval. `false` when already running.
    pub fn start_mirror(&self) -> bool {
        let module = self.module.clone();
        self.mirror.start(self.every, move || read_state(module.clone()))
    }

    #[allow(clippy::unused_async)]
    async fn resume_mirror(&self) {
        if self.start_mirror() {
            debug!(every = ?self.every, "Monitor mirror started");
        }
    }

    pub fn stop_mirror(&self) -> bool {
        self.mirror.stop()
    }

    /// One mirror read outside the loop.
    ///
    /// # Errors
    /// The snapshot read failed; the view is left as it was.
    pub async fn refresh(&self) -> Result<(), BridgeError> {
        read_state(self.module.clone()).await
    }
}

async fn read_state(module: FeatureModule<MonitorSchema>) -> Result<(), BridgeError> {
    // A toggle made while the reads are outstanding wins over what they report.
    let revision = module.revision();
    let payload: Value = module.bridge().call(&ops::STATE_SNAPSHOT, Vec::new()).await?;
    let state = decode_state(&payload);
    let running = match module.bridge().call_as::<bool>(&ops::IS_RUNNING, Vec::new()).await {
        Ok(running) => Some(running),
        Err(e) => {
            debug!(error = %e, "Watcher status unavailable");
            None
        },
    };
    let settled = module.revision() == revision && module.pending().is_empty() && !module.is_pushing();

    module.apply_remote(|view| {
        view.hp_percent = state.hp;
        view.alive = state.alive;
        if let Some(running) = running {
            view.running = Some(running);
            if settled {
                view.enabled = running;
            }
        }
    });
    Ok(())
}

/// Initialize the monitor feature. The mirror starts on boot.
///
/// # Errors
/// Fails outside a tokio runtime.
pub fn init(ctx: &SyncContext) -> Result<Monitor, MonitorError> {
    ctx.bridge.register(ops::descriptor());
    let module = FeatureModule::new(MonitorSchema, ctx.bridge.clone(), &ctx.config).context("monitor module")?;
    info!("Monitor slice initialized");
    Ok(Monitor::new(MonitorInner {
        module,
        mirror: PollingMirror::new("monitor"),
        every: ctx.config.mirror_interval(),
    }))
}
