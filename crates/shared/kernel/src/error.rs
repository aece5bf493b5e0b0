use revive_bridge::BridgeError;
use revive_event_bus::EventBusError;
use std::borrow::Cow;

/// Failures of the synchronization core.
#[revive_derive::revive_error]
pub enum SyncError {
    #[degraded]
    #[error("Bridge error{}: {source}", format_context(.context))]
    Bridge { source: BridgeError, context: Option<Cow<'static, str>> },

    /// Local input that could not be sanitized into a value.
    #[error("Invalid input{}: {message}", format_context(.context))]
    InvalidInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Module construction outside a tokio runtime.
    #[error("Runtime unavailable{}: {message}", format_context(.context))]
    Runtime { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Event bus error{}: {source}", format_context(.context))]
    Events { source: EventBusError, context: Option<Cow<'static, str>> },

    #[error("Internal sync error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SyncError {
    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidInput { message: message.into(), context: None }
    }
}
