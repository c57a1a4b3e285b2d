#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the `SecureMem` infrastructure crates.
//!
//! * [`macro@smem_error`] turns an enum into a `thiserror` error with a context extension trait.
//! * [`macro@vault_model`] marks a struct or enum as a value that can be stored in the vault.
//!
//! Examples are `ignore`d here because they reference the consuming crates.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro that turns a type into a vault value.
///
/// The macro adds `Serialize` and `Deserialize` (routed through the `serde`
/// re-export of `smem_vault`, so consumers do not need a direct `serde`
/// dependency), adds `Debug`, `Clone` and `PartialEq` unless they are already
/// derived, and implements `smem_vault::VaultValue`.
///
/// Field-level serde attributes (`#[serde(rename = ...)]`, `#[serde(default)]`, ...)
/// are preserved.
///
/// # Errors
/// Emits a compile-time error if arguments are passed or the item is a union.
///
/// # Example
/// ```rust,ignore
/// use smem_vault::prelude::*;
///
/// #[vault_model]
/// struct User {
///     id: u64,
///     name: String,
///     email: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn vault_model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::vault::expand(args.into(), input).into()
}

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to results carrying this error or one of its wrapped source errors.
/// * **Standard Conversions**: Implements `From<T>` for variants holding a `source: T`
///   field (or a field marked `#[source]`/`#[from]`), enabling `?` on upstream errors.
/// * **Formatting Helper**: Emits a module-local `format_context` function for use in
///   `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants with a source must also have `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use smem_derive::smem_error;
/// use std::borrow::Cow;
///
/// #[smem_error]
/// pub enum StoreError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Missing entry{}: {message}", format_context(.context))]
///     Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<Vec<u8>, StoreError> {
///     std::fs::read(path).context("Reading snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn smem_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
