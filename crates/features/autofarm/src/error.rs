use revive_kernel::SyncError;
use std::borrow::Cow;

/// A specialized [`AutofarmError`] enum of this crate.
#[revive_derive::revive_error]
pub enum AutofarmError {
    #[error("Autofarm sync error{}: {source}", format_context(.context))]
    Sync { source: SyncError, context: Option<Cow<'static, str>> },
    #[error("Internal autofarm error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
