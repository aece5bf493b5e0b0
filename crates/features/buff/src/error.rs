use revive_kernel::SyncError;
use revive_kernel::bridge::BridgeError;
use std::borrow::Cow;

/// A specialized [`BuffError`] enum of this crate.
#[revive_derive::revive_error]
pub enum BuffError {
    #[error("Buff sync error{}: {source}", format_context(.context))]
    Sync { source: SyncError, context: Option<Cow<'static, str>> },
    #[degraded]
    #[error("Buff bridge error{}: {source}", format_context(.context))]
    Bridge { source: BridgeError, context: Option<Cow<'static, str>> },
    #[error("Internal buff error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
