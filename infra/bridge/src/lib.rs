//! # Bridge
//!
//! Everything between the synchronization core and the host's asynchronous call surface.
//!
//! * [`Capability`] is the host object: named request/response operations.
//! * [`ReadinessGate`] resolves once the host has attached that object, racing the host's
//!   ready event against a bounded poll.
//! * [`Negotiator`] maps logical [`Operation`]s onto whichever candidate name the host exposes,
//!   driven by per-feature [`CapabilityDescriptor`]s.
//! * [`BridgeHandle`] bundles both and is passed explicitly to every feature slice.
//!
//! ```rust,ignore
//! let bridge = BridgeHandle::new(ReadinessConfig::default());
//! bridge.register(macros::descriptor());
//! host.attach_to(&bridge);
//! bridge.ready().await;
//! let cfg: MacrosConfig = bridge.call_as(&ops::GET, vec![]).await?;
//! ```

mod capability;
mod descriptor;
mod error;
mod gate;
mod handle;
#[cfg(any(test, feature = "memory-host"))]
pub mod memory;
mod negotiator;

pub use capability::{Capability, HostNotifier};
pub use descriptor::{Call, CapabilityDescriptor, Operation, PushStep};
pub use error::{BridgeError, BridgeErrorExt};
pub use gate::{ReadinessConfig, ReadinessGate};
pub use handle::BridgeHandle;
pub use negotiator::Negotiator;

/// Re-exported so feature crates build call arguments without naming `serde_json`.
pub use serde_json::{Value, json};
