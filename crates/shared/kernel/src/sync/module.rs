use crate::error::SyncError;
use crate::sync::hydration;
use crate::sync::schema::{Cadence, FeatureSchema};
use async_trait::async_trait;
use parking_lot::Mutex;
use revive_bridge::BridgeHandle;
use revive_domain::config::SyncConfig;
use revive_domain::features::FeatureId;
use revive_domain::state::{CommitOutcome, HydrationState};
use revive_event_bus::{Event, EventBus, EventReceiverExt};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, trace, warn};

/// Boot and context-switch hooks, object safe so the facade can drive every slice alike.
#[async_trait]
pub trait Lifecycle: Send + Sync + fmt::Debug {
    fn feature(&self) -> FeatureId;

    fn hydration(&self) -> HydrationState;

    /// Waits for the bridge and hydrates once.
    async fn boot(&self);

    /// Hydrates again after a context switch.
    async fn rehydrate(&self);
}

struct SyncState<G> {
    hydration: HydrationState,
    generation: u64,
    /// Dirty groups and when they become due.
    pending: BTreeMap<G, Instant>,
    in_flight: bool,
    /// Accepted edits since construction.
    edits: u64,
}

struct ModuleInner<S: FeatureSchema> {
    schema: S,
    bridge: BridgeHandle,
    debounce: Duration,
    sync: Mutex<SyncState<S::Group>>,
    view: watch::Sender<S::View>,
    hydration: watch::Sender<HydrationState>,
    wake: mpsc::UnboundedSender<()>,
    booted: AtomicBool,
    pushes: AtomicU64,
    failures: AtomicU64,
}

/// One feature's local projection and its sync with the store.
///
/// * Edits are accepted only while [`HydrationState::Live`].
/// * Each edit group is pushed immediately or after the debounce window, with the newest view.
/// * A background driver sends pushes one at a time; failures are logged and not retried.
pub struct FeatureModule<S: FeatureSchema> {
    inner: Arc<ModuleInner<S>>,
}

impl<S: FeatureSchema> Clone for FeatureModule<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: FeatureSchema> fmt::Debug for FeatureModule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sync = self.inner.sync.lock();
        f.debug_struct("FeatureModule")
            .field("feature", &S::FEATURE)
            .field("hydration", &sync.hydration)
            .field("generation", &sync.generation)
            .field("pending", &sync.pending.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<S: FeatureSchema> FeatureModule<S> {
    /// Creates the module and spawns its push driver on the current runtime.
    ///
    /// # Errors
    /// [`SyncError::Runtime`] outside a tokio runtime.
    pub fn new(schema: S, bridge: BridgeHandle, config: &SyncConfig) -> Result<Self, SyncError> {
        let runtime = Handle::try_current().map_err(|e| SyncError::Runtime {
            message: e.to_string().into(),
            context: Some(S::FEATURE.as_str().into()),
        })?;

        let (wake, signals) = mpsc::unbounded_channel();
        let inner = Arc::new(ModuleInner {
            schema,
            bridge,
            debounce: config.debounce(),
            sync: Mutex::new(SyncState {
                hydration: HydrationState::Idle,
                generation: 0,
                edits: 0,
                pending: BTreeMap::new(),
                in_flight: false,
            }),
            view: watch::channel(S::View::default()).0,
            hydration: watch::channel(HydrationState::Idle).0,
            wake,
            booted: AtomicBool::new(false),
            pushes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        });
        runtime.spawn(drive(Arc::downgrade(&inner), signals));
        debug!(feature = %S::FEATURE, "Feature module created");

        Ok(Self { inner })
    }

    pub fn schema(&self) -> &S {
        &self.inner.schema
    }

    pub fn bridge(&self) -> &BridgeHandle {
        &self.inner.bridge
    }

    pub fn view(&self) -> S::View {
        self.inner.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<S::View> {
        self.inner.view.subscribe()
    }

    pub fn hydration_state(&self) -> HydrationState {
        self.inner.sync.lock().hydration
    }

    pub fn subscribe_hydration(&self) -> watch::Receiver<HydrationState> {
        self.inner.hydration.subscribe()
    }

    pub fn generation(&self) -> u64 {
        self.inner.sync.lock().generation
    }

    /// `(generation, accepted edits)`. Any hydration or local edit changes it.
    pub fn revision(&self) -> (u64, u64) {
        let sync = self.inner.sync.lock();
        (sync.generation, sync.edits)
    }

    /// Groups waiting for their push.
    pub fn pending(&self) -> Vec<S::Group> {
        self.inner.sync.lock().pending.keys().copied().collect()
    }

    pub fn is_pushing(&self) -> bool {
        self.inner.sync.lock().in_flight
    }

    /// Push steps sent successfully.
    pub fn push_count(&self) -> u64 {
        self.inner.pushes.load(Ordering::Relaxed)
    }

    pub fn push_failures(&self) -> u64 {
        self.inner.failures.load(Ordering::Relaxed)
    }

    /// Waits for the bridge, then hydrates. Later calls return the current view.
    pub async fn boot(&self) -> S::View {
        if self.inner.booted.swap(true, Ordering::AcqRel) {
            return self.view();
        }
        self.inner.bridge.ready().await;
        self.hydrate().await
    }

    /// Loads the authoritative state into the view and goes live.
    ///
    /// Pending edits are dropped and the generation bumped, so pushes scheduled before this
    /// call never reach the store. Always ends [`HydrationState::Live`].
    pub async fn hydrate(&self) -> S::View {
        let generation = {
            let mut sync = self.inner.sync.lock();
            sync.generation += 1;
            sync.pending.clear();
            sync.hydration = HydrationState::Hydrating;
            sync.generation
        };
        self.inner.hydration.send_replace(HydrationState::Hydrating);
        info!(feature = %S::FEATURE, generation, "Hydrating");

        let mut view = hydration::load(&self.inner.schema, &self.inner.bridge).await;

        let mut sync = self.inner.sync.lock();
        if sync.generation == generation {
            self.inner.schema.carry(&self.inner.view.borrow(), &mut view);
            self.inner.view.send_replace(view.clone());
            sync.hydration = HydrationState::Live;
            self.inner.hydration.send_replace(HydrationState::Live);
            info!(feature = %S::FEATURE, generation, "Live");
        } else {
            debug!(feature = %S::FEATURE, generation, current = sync.generation, "Hydration superseded");
        }
        view
    }

    /// Local edit. Applied optimistically and scheduled for push.
    pub fn commit(&self, patch: S::Patch) -> CommitOutcome {
        let mut sync = self.inner.sync.lock();
        if !sync.hydration.is_live() {
            debug!(feature = %S::FEATURE, ?patch, state = ?sync.hydration, "Edit suppressed");
            return CommitOutcome::Suppressed;
        }

        let mut view = self.inner.view.borrow().clone();
        let group = match self.inner.schema.apply(&mut view, patch) {
            Ok(group) => group,
            Err(reason) => {
                debug!(feature = %S::FEATURE, %reason, "Edit rejected");
                return CommitOutcome::Rejected { reason };
            },
        };
        self.inner.view.send_replace(view);

        let now = Instant::now();
        let cadence = self.inner.schema.cadence(group);
        let due = match cadence {
            Cadence::Immediate => now,
            Cadence::Debounced => now + self.inner.debounce,
        };
        for stale in self.inner.schema.supersedes(group) {
            if sync.pending.remove(&stale).is_some() {
                trace!(feature = %S::FEATURE, ?stale, ?group, "Pending edit superseded");
            }
        }
        for earlier in self.inner.schema.requires(group) {
            if let Some(at) = sync.pending.get_mut(&earlier) {
                *at = (*at).min(due);
            }
        }
        sync.pending.insert(group, due);
        sync.edits += 1;
        drop(sync);

        trace!(feature = %S::FEATURE, ?group, ?cadence, "Edit scheduled");
        if self.inner.wake.send(()).is_err() {
            warn!(feature = %S::FEATURE, "Push driver stopped; edit stays local");
        }
        CommitOutcome::Accepted
    }

    /// Render-only update from a store notification. Bypasses the edit path.
    pub fn apply_remote(&self, update: impl FnOnce(&mut S::View)) {
        self.inner.view.send_modify(update);
    }

    /// Applies every `E` published on `events` through [`FeatureModule::apply_remote`].
    ///
    /// The listener ends when the module is dropped or the bus shuts down.
    ///
    /// # Errors
    /// Outside a tokio runtime.
    pub fn follow<E, F>(&self, events: &EventBus, apply: F) -> Result<(), SyncError>
    where
        E: Event,
        F: Fn(&mut S::View, &E) + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|e| SyncError::Runtime {
            message: e.to_string().into(),
            context: Some(S::FEATURE.as_str().into()),
        })?;
        let mut events = events.subscribe::<E>()?;
        let module = Arc::downgrade(&self.inner);

        runtime.spawn(async move {
            while let Some(event) = EventReceiverExt::recv(&mut events).await {
                let Some(inner) = module.upgrade() else { return };
                inner.view.send_modify(|view| apply(view, &event));
                trace!(feature = %S::FEATURE, event = std::any::type_name::<E>(), "Remote update applied");
            }
        });
        Ok(())
    }
}

impl<S: FeatureSchema> ModuleInner<S> {
    fn next_due(&self) -> Option<Instant> {
        self.sync.lock().pending.values().min().copied()
    }

    async fn flush_due(&self) {
        let (groups, generation) = {
            let mut sync = self.sync.lock();
            if !sync.hydration.is_live() {
                sync.pending.clear();
                return;
            }
            let now = Instant::now();
            let due: Vec<S::Group> = sync.pending.iter().filter(|&(_, at)| *at <= now).map(|(g, _)| *g).collect();
            sync.pending.retain(|_, at| *at > now);
            sync.in_flight = true;
            (due, sync.generation)
        };

        for group in groups {
            let steps = {
                let sync = self.sync.lock();
                if sync.generation != generation {
                    debug!(feature = %S::FEATURE, ?group, "Push discarded by re-hydration");
                    break;
                }
                self.schema.push(&self.view.borrow(), group)
            };

            for step in &steps {
                match self.bridge.run_step(step).await {
                    Ok(()) => {
                        self.pushes.fetch_add(1, Ordering::Relaxed);
                        debug!(feature = %S::FEATURE, step = step.label, generation, "Pushed");
                    },
                    Err(e) => {
                        self.failures.fetch_add(1, Ordering::Relaxed);
                        warn!(feature = %S::FEATURE, step = step.label, error = %e, "Push failed; local state kept");
                    },
                }
            }
        }

        self.sync.lock().in_flight = false;
    }
}

/// Push driver. Holds the module weakly and exits when it is dropped.
async fn drive<S: FeatureSchema>(module: Weak<ModuleInner<S>>, mut signals: mpsc::UnboundedReceiver<()>) {
    loop {
        let due = match module.upgrade() {
            Some(inner) => inner.next_due(),
            None => return,
        };

        tokio::select! {
            signal = signals.recv() => {
                if signal.is_none() {
                    return;
                }
            },
            () = sleep_until(due.unwrap_or_else(Instant::now)), if due.is_some() => {
                let Some(inner) = module.upgrade() else { return };
                inner.flush_due().await;
            },
        }
    }
}

#[async_trait]
impl<S: FeatureSchema> Lifecycle for FeatureModule<S> {
    fn feature(&self) -> FeatureId {
        S::FEATURE
    }

    fn hydration(&self) -> HydrationState {
        self.hydration_state()
    }

    async fn boot(&self) {
        Self::boot(self).await;
    }

    async fn rehydrate(&self) {
        self.hydrate().await;
    }
}
