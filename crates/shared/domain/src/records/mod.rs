//! Feature records as mirrored from the store.
//!
//! Every record deserializes leniently (`#[serde(default)]`): missing fields fall back to the
//! same defaults a fresh install would show.

mod autofarm;
mod buff;
mod lenient;
mod macros;
mod monitor;
mod pipeline;
mod respawn;
mod teleport;

pub use autofarm::{AutofarmConfig, AutofarmView, SkillSlot};
pub use buff::BuffConfig;
pub use macros::{MacroRow, MacrosConfig};
pub use monitor::{MonitorView, StateSnapshot};
pub use pipeline::PipelineOrder;
pub use respawn::{RespawnConfig, RespawnWaitConfig};
pub use teleport::{RowEntry, TeleportConfig, TeleportView};
