use revive_kernel::SyncError;
use std::borrow::Cow;

/// A specialized [`PipelineError`] enum of this crate.
#[revive_derive::revive_error]
pub enum PipelineError {
    #[error("Pipeline sync error{}: {source}", format_context(.context))]
    Sync { source: SyncError, context: Option<Cow<'static, str>> },
    #[error("Internal pipeline error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
