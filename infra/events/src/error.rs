use std::borrow::Cow;

/// Errors raised by [`EventBus`](crate::EventBus) registration.
#[revive_derive::revive_error]
pub enum EventBusError {
    /// The type registry held a sender of another event type; an invariant violation.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
