//! # Runtime
//!
//! Runtime profiles for the control surface.
//!
//! The synchronization core assumes one logical task runs at a time: bridge calls are the
//! only suspension points, and debounce timers, mirror ticks and notifications interleave
//! between them. [`RuntimeConfig::cooperative`] builds exactly that (`current_thread`).
//! [`RuntimeConfig::high_throughput`] exists for hosts that embed the core next to other
//! work; every core type is `Send + Sync`, so nothing changes for the features.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[revive_runtime::main(cooperative)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use revive_derive::main;

use anyhow::anyhow;
use std::{sync::OnceLock, thread::available_parallelism, time::Duration};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

/// Fallback worker count when parallelism cannot be detected.
const DEFAULT_WORKER_THREADS: usize = 4;
/// Default stack size for spawned threads (2 `MiB`).
const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;
const MIN_STACK_SIZE: usize = 1024 * 1024;
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
const THREAD_KEEP_ALIVE: Duration = Duration::from_secs(60);
const DEFAULT_THREAD_NAME: &str = "revive-worker";

static WORKER_THREADS: OnceLock<usize> = OnceLock::new();

fn detected_worker_threads() -> usize {
    *WORKER_THREADS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0 && n <= 1024)
            .unwrap_or_else(|| {
                available_parallelism().map(std::num::NonZero::get).unwrap_or(DEFAULT_WORKER_THREADS)
            })
    })
}

/// Scheduler flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Everything runs on the calling thread.
    CurrentThread,
    MultiThread,
}

/// Configuration for the Tokio runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub flavor: Flavor,
    /// Ignored for [`Flavor::CurrentThread`].
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::cooperative()
    }
}

impl RuntimeConfig {
    /// Single-threaded cooperative scheduling.
    #[must_use]
    pub fn cooperative() -> Self {
        Self {
            flavor: Flavor::CurrentThread,
            worker_threads: 1,
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: "revive-main".to_owned(),
            thread_keep_alive: THREAD_KEEP_ALIVE,
        }
    }

    /// Multi-threaded runtime sized to the available parallelism.
    #[must_use]
    pub fn high_throughput() -> Self {
        Self {
            flavor: Flavor::MultiThread,
            worker_threads: detected_worker_threads(),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: THREAD_KEEP_ALIVE,
        }
    }

    #[must_use = "Customize the number of worker threads for the runtime"]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, 1024);
        self
    }

    #[must_use = "Customize the stack size for worker threads"]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use = "Customize the thread name"]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name = if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }

    #[must_use]
    fn normalized(&self) -> Self {
        self.clone()
            .with_worker_threads(self.worker_threads)
            .with_stack_size(self.stack_size)
            .with_thread_name(self.thread_name.clone())
    }
}

/// Builds a runtime for `config`, with timers and I/O enabled.
///
/// # Errors
///
/// Fails when Tokio cannot create the runtime (thread spawn refused, resource limits).
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config.normalized();
    debug!(config = ?config, "Building tokio runtime");

    let mut builder = match config.flavor {
        Flavor::CurrentThread => Builder::new_current_thread(),
        Flavor::MultiThread => {
            let mut builder = Builder::new_multi_thread();
            builder.worker_threads(config.worker_threads);
            builder
        }
    };
    builder
        .thread_name(&config.thread_name)
        .thread_stack_size(config.stack_size)
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all();

    let runtime = builder.build().map_err(|e| anyhow!("Failed to initialize runtime: {e}"))?;
    info!(flavor = ?config.flavor, threads = config.worker_threads, "Runtime ready");
    Ok(runtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooperative_is_the_default_profile() {
        let config = RuntimeConfig::default();
        assert_eq!(config.flavor, Flavor::CurrentThread);
        assert_eq!(config.worker_threads, 1);
    }

    #[test]
    fn builders_clamp_out_of_range_values() {
        let config = RuntimeConfig::high_throughput().with_worker_threads(0).with_stack_size(100);
        assert_eq!(config.worker_threads, 1);
        assert_eq!(config.stack_size, MIN_STACK_SIZE);

        let config = RuntimeConfig::high_throughput()
            .with_worker_threads(2000)
            .with_stack_size(100 * 1024 * 1024)
            .with_thread_name("   ");
        assert_eq!(config.worker_threads, 1024);
        assert_eq!(config.stack_size, MAX_STACK_SIZE);
        assert_eq!(config.thread_name, DEFAULT_THREAD_NAME);
    }

    #[test]
    fn cooperative_runtime_runs_spawned_tasks_on_one_thread() {
        let rt = build_runtime_with_config(&RuntimeConfig::cooperative()).unwrap();
        let outer = std::thread::current().id();
        let inner = rt.block_on(async {
            tokio::spawn(async { std::thread::current().id() }).await.unwrap()
        });
        assert_eq!(outer, inner);
    }

    #[test]
    fn cooperative_runtime_has_timers() {
        let rt = build_runtime_with_config(&RuntimeConfig::cooperative()).unwrap();
        rt.block_on(async { tokio::time::sleep(Duration::from_millis(1)).await });
    }
}
