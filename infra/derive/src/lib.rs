#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace: the runtime entry point, error enums and
//! feature slice handles.
//!
//! Examples are `ignore`d here because they need the consuming crates in scope.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the Tokio runtime from an `async fn main`.
///
/// # Arguments
///
/// * `cooperative` - single-threaded `current_thread` runtime (the default).
/// * `high_throughput` - multi-threaded runtime sized to available parallelism.
/// * `default` - `RuntimeConfig::default()`.
///
/// # Examples
///
/// ```rust,ignore
/// #[revive_runtime::main(cooperative)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Turns an enum into a workspace error type.
///
/// * Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * Generates a companion `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and
///   to `Result<T, Source>` for every variant carrying a `source`/`#[source]`/`#[from]` field.
/// * Implements `From<Source>` for those variants.
/// * Implements `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * Generates `is_degraded()`, true for variants marked `#[degraded]`. Degraded failures are
///   logged and swallowed by callers instead of surfacing.
///
/// Variants must use named fields; variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use revive_derive::revive_error;
/// use std::borrow::Cow;
///
/// #[revive_error]
/// pub enum BridgeError {
///     #[degraded]
///     #[error("Bridge not ready{}", format_context(.context))]
///     NotReady { context: Option<Cow<'static, str>> },
///
///     #[error("Decode failed{}: {source}", format_context(.context))]
///     Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn revive_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is a cheap `Arc` handle that
/// derefs to it and implements `FeatureSlice` for the given `FeatureId` variant.
///
/// It also implements `Lifecycle` over the struct's `module` field. `after_boot = method`
/// and `after_hydrate = method` name async methods awaited after the module's own boot or
/// re-hydration.
///
/// # Example
/// ```rust,ignore
/// #[revive_derive::revive_slice(Macros)]
/// pub struct MacrosSlice {
///     pub module: FeatureModule<MacrosSchema>,
/// }
///
/// #[revive_derive::revive_slice(Teleport, after_hydrate = refresh_methods)]
/// pub struct TeleportSlice {
///     pub module: FeatureModule<TeleportSchema>,
/// }
///
/// let slice = MacrosSlice::new(MacrosSliceInner { module });
/// ```
#[proc_macro_attribute]
pub fn revive_slice(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(args.into(), input).into()
}
