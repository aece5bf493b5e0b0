use std::borrow::Cow;

/// Failures of bridge calls.
///
/// `NotReady`, `Unsupported` and `Call` are degraded: callers log and carry on.
#[revive_derive::revive_error]
pub enum BridgeError {
    #[degraded]
    #[error("Bridge not ready{}", format_context(.context))]
    NotReady { context: Option<Cow<'static, str>> },

    /// No candidate name of the operation is exposed by the host.
    #[degraded]
    #[error("Operation unsupported{}: {operation}", format_context(.context))]
    Unsupported { operation: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The host rejected or failed the call.
    #[degraded]
    #[error("Call to {operation} failed{}: {message}", format_context(.context))]
    Call { operation: String, message: String, context: Option<Cow<'static, str>> },

    #[error("Decode failed{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal bridge error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl BridgeError {
    pub fn call(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Call { operation: operation.into(), message: message.into(), context: None }
    }

    pub fn unsupported(operation: impl Into<Cow<'static, str>>) -> Self {
        Self::Unsupported { operation: operation.into(), context: None }
    }
}
