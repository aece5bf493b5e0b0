use parking_lot::Mutex;
use revive_bridge::BridgeError;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Counters {
    ticks: AtomicU64,
    failures: AtomicU64,
}

#[derive(Debug)]
struct MirrorInner {
    name: &'static str,
    task: Mutex<Option<JoinHandle<()>>>,
    counters: Arc<Counters>,
}

impl Drop for MirrorInner {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

/// Read-only polling loop for transient store state.
///
/// The read closure updates display fields itself; the mirror only schedules it, counts
/// ticks and failures, and keeps going after errors. Never writes to the store.
#[derive(Debug, Clone)]
pub struct PollingMirror {
    inner: Arc<MirrorInner>,
}

impl PollingMirror {
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Arc::new(MirrorInner { name, task: Mutex::new(None), counters: Arc::default() }),
        }
    }

    /// Starts polling. Returns `false` when already running or outside a runtime.
    pub fn start<F, Fut>(&self, every: Duration, mut read: F) -> bool
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), BridgeError>> + Send + 'static,
    {
        let mut task = self.inner.task.lock();
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return false;
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!(mirror = self.inner.name, "No runtime; mirror not started");
            return false;
        };

        let name = self.inner.name;
        let counters = Arc::clone(&self.inner.counters);
        let every = every.max(Duration::from_millis(1));
        *task = Some(runtime.spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut failing = false;
            loop {
                ticker.tick().await;
                counters.ticks.fetch_add(1, Ordering::Relaxed);
                match read().await {
                    Ok(()) if failing => {
                        failing = false;
                        debug!(mirror = name, "Mirror read recovered");
                    },
                    Ok(()) => {},
                    Err(e) => {
                        counters.failures.fetch_add(1, Ordering::Relaxed);
                        if failing {
                            debug!(mirror = name, error = %e, "Mirror read failed again");
                        } else {
                            warn!(mirror = name, error = %e, "Mirror read failed");
                        }
                        failing = true;
                    },
                }
            }
        }));
        info!(mirror = name, interval_ms = every.as_millis(), "Mirror started");
        true
    }

    /// Stops polling. Idempotent; returns whether a loop was running.
    pub fn stop(&self) -> bool {
        let Some(task) = self.inner.task.lock().take() else {
            return false;
        };
        task.abort();
        info!(mirror = self.inner.name, "Mirror stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.inner.task.lock().as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn ticks(&self) -> u64 {
        self.inner.counters.ticks.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.inner.counters.failures.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[tokio::test(start_paused = true)]
    async fn keeps_ticking_after_failures() {
        let mirror = PollingMirror::new("test");
        let reads = Arc::new(AtomicU32::new(0));
        let started = mirror.start(Duration::from_millis(100), {
            let reads = Arc::clone(&reads);
            move || {
                let n = reads.fetch_add(1, Ordering::Relaxed);
                async move { if n == 1 { Err(BridgeError::call("state_last", "timeout")) } else { Ok(()) } }
            }
        });
        assert!(started);

        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(mirror.ticks() >= 4);
        assert_eq!(mirror.failures(), 1);
        assert!(reads.load(Ordering::Relaxed) >= 4);
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop_are_idempotent() {
        let mirror = PollingMirror::new("test");
        assert!(mirror.start(Duration::from_millis(10), || async { Ok(()) }));
        assert!(!mirror.start(Duration::from_millis(10), || async { Ok(()) }));
        assert!(mirror.is_running());

        assert!(mirror.stop());
        assert!(!mirror.stop());
        let ticks = mirror.ticks();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(mirror.ticks(), ticks);

        assert!(mirror.start(Duration::from_millis(10), || async { Ok(()) }));
    }
}
