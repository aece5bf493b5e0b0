use crate::features::{autofarm, buff, macros, monitor, pipeline, respawn, teleport};
use revive_bridge::BridgeError;
use std::borrow::Cow;

/// A specialized [`SurfaceError`] enum of this crate.
#[revive_derive::revive_error]
pub enum SurfaceError {
    #[error("Bridge error{}: {source}", format_context(.context))]
    #[degraded]
    Bridge { source: BridgeError, context: Option<Cow<'static, str>> },
    #[error("Macros init failed{}: {source}", format_context(.context))]
    Macros { source: macros::MacrosError, context: Option<Cow<'static, str>> },
    #[error("Autofarm init failed{}: {source}", format_context(.context))]
    Autofarm { source: autofarm::AutofarmError, context: Option<Cow<'static, str>> },
    #[error("Teleport init failed{}: {source}", format_context(.context))]
    Teleport { source: teleport::TeleportError, context: Option<Cow<'static, str>> },
    #[error("Respawn init failed{}: {source}", format_context(.context))]
    Respawn { source: respawn::RespawnError, context: Option<Cow<'static, str>> },
    #[error("Buff init failed{}: {source}", format_context(.context))]
    Buff { source: buff::BuffError, context: Option<Cow<'static, str>> },
    #[error("Monitor init failed{}: {source}", format_context(.context))]
    Monitor { source: monitor::MonitorError, context: Option<Cow<'static, str>> },
    #[error("Pipeline init failed{}: {source}", format_context(.context))]
    Pipeline { source: pipeline::PipelineError, context: Option<Cow<'static, str>> },
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
