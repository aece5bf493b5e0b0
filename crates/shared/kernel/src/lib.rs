//! Kernel shared across feature slices.
//! Keep this crate free of feature knowledge; slices plug in through [`sync::FeatureSchema`].
//!
//! ## Synchronization
//! Each feature owns one [`sync::FeatureModule`]: it waits for the bridge, hydrates from the
//! store without echoing the snapshot back, and forwards local edits with per-group debouncing
//! and a single push in flight.
//!
//! ```rust,ignore
//! let module = FeatureModule::new(MacrosSchema, ctx.bridge.clone(), &ctx.config)?;
//! module.boot().await;
//! assert!(module.commit(MacrosPatch::Enabled(true)).is_accepted());
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use revive_kernel::config::load_config;
//! let cfg: SurfaceConfig = load_config(Some("revive.toml"))?;
//! ```

pub mod config;
mod error;
pub mod ops;
pub mod sync;

pub use crate::error::{SyncError, SyncErrorExt};
pub use async_trait::async_trait;
pub use revive_bridge as bridge;
pub use revive_domain as domain;
pub use revive_event_bus as events;
