use revive_derive::revive_error;
use std::borrow::Cow;

#[revive_error]
pub enum DemoError {
    #[error("Decode failed{}: {source}", format_context(.context))]
    Decode {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, DemoError> {
    raw.parse::<u32>().context("parsing wait seconds")
}

fn main() {
    let err = parse("nope").unwrap_err();
    assert!(err.to_string().contains("(parsing wait seconds)"));
    assert!(!err.is_degraded());

    let internal: DemoError = "boom".into();
    let with_ctx: Result<(), DemoError> = Err(internal);
    let err = with_ctx.context("flushing rows").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (flushing rows): boom");
}
