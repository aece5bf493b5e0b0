//! # Event Bus
//!
//! Typed pub-sub used to carry store-initiated notifications (status lines, row lists,
//! buff method lists) from the bridge host to the feature slices that render them.
//!
//! * Events are keyed by their Rust type; each type gets one broadcast channel.
//! * A subscriber that falls behind skips to the newest events.
//! * Publishing with nobody subscribed is not an error; the event is dropped and traced.
//!
//! # Example
//!
//! ```rust
//! use revive_event_bus::{EventBus, EventReceiverExt, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct RowSelected(String);
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     assert_eq!(bus.publish(RowSelected("early".into()))?, 0);
//!
//!     let mut rx = bus.subscribe::<RowSelected>()?;
//!     bus.publish(RowSelected("giran".into()))?;
//!     assert_eq!(rx.recv().await.unwrap().0, "giran");
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{CHANNEL_CAPACITY, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
