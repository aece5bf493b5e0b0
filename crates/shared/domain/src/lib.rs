//! # Domain Models
//!
//! Pure data for the control surface: feature records as the store reports them, bridge and
//! hydration states, store notifications, one-shot replies and the surface configuration.
//!
//! Dependencies stay at `serde` and `bitflags`. No I/O, no async, no logic beyond small
//! constructors and conversions.

pub mod config;
pub mod constants;
pub mod features;
pub mod init_state;
pub mod notify;
pub mod records;
pub mod registry;
pub mod reply;
pub mod state;
