#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros used across the Livepad workspace: error enums, API models and
//! handlers, and the runtime entry point.
//!
//! The examples below are `ignore`d because a proc-macro crate cannot exercise its
//! own output; the consuming crates carry the compiled versions in their tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns `async fn main` into a synchronous `main` running on a preset Tokio runtime.
///
/// # Arguments
///
/// * `server` - multi-threaded preset sized for the API server.
/// * `client` - smaller preset for the desktop editor.
/// * no argument - the default preset.
///
/// The annotated function must be `async` and return a `Result`.
///
/// ```rust,ignore
/// #[lpad_runtime::main(server)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares a wire DTO.
///
/// * Adds `Debug`, `Serialize` and `Deserialize` unless already derived.
/// * Adds `utoipa::ToSchema` when the consuming crate's `server` feature is on.
/// * Applies `#[serde(rename_all = "camelCase")]` unless `rename_all = "..."` is given.
/// * Applies `#[serde(deny_unknown_fields)]` unless `deny_unknown_fields = false`.
///
/// ```rust,ignore
/// #[api_model(deny_unknown_fields = false)]
/// pub struct UpdateProjectRequest {
///     #[serde(default)]
///     pub html: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Wraps an Axum handler and forwards its arguments to `utoipa::path` when the
/// consuming crate's `server` feature is enabled.
///
/// ```rust,ignore
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a crate error enum on top of `thiserror`.
///
/// Every variant must use named fields. A variant that wraps another error names
/// that field `source` (or marks it `#[source]`/`#[from]`) and must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// Generated items:
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<Name>Ext` with `.context(...)` for `Result<T, Name>` and for every wrapped
///   source error type.
/// * `From<Source>` for each wrapping variant.
/// * `From<&'static str>` / `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * `Name::context_str()` returning the attached context, if any.
/// * A private `format_context` helper used in `#[error(...)]` strings.
///
/// ```rust,ignore
/// #[lpad_error]
/// pub enum StorageError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal storage error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn lpad_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
