use revive_derive::revive_error;
use std::borrow::Cow;

#[revive_error]
pub enum LinkError {
    #[degraded]
    #[error("Link not ready")]
    NotReady { context: Option<Cow<'static, str>> },

    #[degraded]
    #[error("Link io{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("pipe closed"))
}

fn main() {
    assert!(LinkError::NotReady { context: None }.is_degraded());
    assert!(!LinkError::from("broken").is_degraded());

    let err = read().context("reading link").unwrap_err();
    assert!(err.is_degraded());
    assert!(err.to_string().contains("(reading link)"));
}
