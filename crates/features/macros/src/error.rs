use revive_kernel::SyncError;
use std::borrow::Cow;

/// A specialized [`MacrosError`] enum of this crate.
#[revive_derive::revive_error]
pub enum MacrosError {
    #[error("Macros sync error{}: {source}", format_context(.context))]
    Sync { source: SyncError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal macros error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
