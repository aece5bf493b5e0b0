use crate::capability::Capability;
use crate::error::BridgeError;
use parking_lot::RwLock;
use revive_domain::config::BridgeConfig;
use revive_domain::state::BridgeState;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Poll fallback tuning for [`ReadinessGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessConfig {
    pub poll_interval: Duration,
    pub max_attempts: u32,
    /// Operation the host must expose before the bridge counts as ready.
    pub required_operation: Option<String>,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self::from(&BridgeConfig::default())
    }
}

impl From<&BridgeConfig> for ReadinessConfig {
    fn from(config: &BridgeConfig) -> Self {
        Self {
            poll_interval: config.poll_interval().max(Duration::from_millis(1)),
            max_attempts: config.max_attempts,
            required_operation: config.required_operation.clone(),
        }
    }
}

#[derive(Debug)]
struct GateInner {
    config: ReadinessConfig,
    /// Written by the host, possibly long before or after it announces readiness.
    slot: RwLock<Option<Arc<dyn Capability>>>,
    announced: watch::Sender<u64>,
    resolved: OnceLock<Arc<dyn Capability>>,
    state: watch::Sender<BridgeState>,
}

/// Resolves once the host's capability object is usable.
///
/// Two signals unblock waiters: [`ReadinessGate::announce`] (the host's ready event) and a
/// bounded poll of the attached slot. Resolution happens exactly once; later signals are
/// no-ops. When the poll cap is reached the fallback stops quietly and waiters stay pending
/// until an announcement arrives.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    inner: Arc<GateInner>,
}

impl ReadinessGate {
    pub fn new(config: ReadinessConfig) -> Self {
        let (announced, _) = watch::channel(0);
        let (state, _) = watch::channel(BridgeState::Unknown);
        Self {
            inner: Arc::new(GateInner {
                config,
                slot: RwLock::new(None),
                announced,
                resolved: OnceLock::new(),
                state,
            }),
        }
    }

    /// Places the capability object. Does not wake waiters by itself; the poll picks it up.
    pub fn attach(&self, capability: Arc<dyn Capability>) {
        debug!(capability = ?capability, "Capability attached");
        *self.inner.slot.write() = Some(capability);
    }

    /// The host's ready event.
    pub fn announce(&self) {
        debug!("Bridge ready announced");
        self.inner.announced.send_modify(|n| *n = n.wrapping_add(1));
    }

    pub async fn await_ready(&self) -> Arc<dyn Capability> {
        if let Some(cap) = self.inner.resolved.get() {
            return cap.clone();
        }
        self.mark_waiting();

        let mut announced = self.inner.announced.subscribe();
        let mut state = self.inner.state.subscribe();
        let mut ticker = interval(self.inner.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut attempts = 0_u32;
        let mut polling = self.inner.config.max_attempts > 0;

        loop {
            if let Some(cap) = self.try_resolve() {
                return cap;
            }
            // Senders live in `self.inner`, so neither `changed` can fail.
            tokio::select! {
                _ = announced.changed() => {},
                _ = state.changed() => {},
                _ = ticker.tick(), if polling => {
                    attempts += 1;
                    if attempts >= self.inner.config.max_attempts {
                        polling = false;
                        debug!(attempts, "Readiness poll exhausted, waiting for host event");
                    }
                },
            }
        }
    }

    /// Waits for the bridge and then for `operation` to appear on it.
    ///
    /// # Errors
    /// [`BridgeError::Unsupported`] when the operation is still missing after the poll cap.
    pub async fn await_operation(&self, operation: &str) -> Result<Arc<dyn Capability>, BridgeError> {
        let cap = self.await_ready().await;
        let mut ticker = interval(self.inner.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for _ in 0..=self.inner.config.max_attempts {
            if cap.has_operation(operation) {
                return Ok(cap);
            }
            ticker.tick().await;
        }
        if cap.has_operation(operation) {
            return Ok(cap);
        }
        Err(BridgeError::unsupported(operation.to_owned()))
    }

    /// Non-blocking readiness check; resolves the gate when the slot is usable.
    ///
    /// With `operation`, also requires that operation to be exposed.
    pub fn probe(&self, operation: Option<&str>) -> bool {
        self.mark_waiting();
        self.try_resolve().is_some_and(|cap| operation.is_none_or(|op| cap.has_operation(op)))
    }

    pub fn state(&self) -> BridgeState {
        *self.inner.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<BridgeState> {
        self.inner.state.subscribe()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.resolved.get().is_some()
    }

    /// The resolved capability, `None` until the gate opened.
    pub fn capability(&self) -> Option<Arc<dyn Capability>> {
        self.inner.resolved.get().cloned()
    }

    fn mark_waiting(&self) {
        self.inner.state.send_if_modified(|state| {
            let first = *state == BridgeState::Unknown;
            if first {
                *state = BridgeState::Waiting;
            }
            first
        });
    }

    fn try_resolve(&self) -> Option<Arc<dyn Capability>> {
        if let Some(cap) = self.inner.resolved.get() {
            return Some(cap.clone());
        }
        let candidate = self.inner.slot.read().clone()?;
        if let Some(required) = self.inner.config.required_operation.as_deref()
            && !candidate.has_operation(required)
        {
            return None;
        }

        let cap = self.inner.resolved.get_or_init(|| {
            info!("Bridge ready");
            self.inner.state.send_replace(BridgeState::Ready);
            candidate
        });
        Some(cap.clone())
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new(ReadinessConfig::default())
    }
}
