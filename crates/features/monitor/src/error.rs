use revive_kernel::SyncError;
use std::borrow::Cow;

/// A specialized [`MonitorError`] enum of this crate.
#[revive_derive::revive_error]
pub enum MonitorError {
    #[error("Monitor sync error{}: {source}", format_context(.context))]
    Sync { source: SyncError, context: Option<Cow<'static, str>> },
    #[error("Internal monitor error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
