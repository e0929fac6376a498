//! Procedural macros for fieldrules.
//!
//! Provides `#[derive(Record)]`, which turns field attributes into the
//! static descriptors the engine walks.

use proc_macro::TokenStream;

/// Record derive macro implementation.
mod record;

/// Derives `Record`, `Inspect` and `InspectMut` for a struct with named
/// fields.
///
/// Field attributes:
/// * `#[validate("required min=3")]` - validation tag, repeatable (joined by a space)
/// * `#[transform("trim lowercase")]` - transform tag, repeatable
/// * `#[record(rename = "UserName")]` - name used in error paths
/// * `#[record(skip)]` - leave the field out entirely
/// * `#[record(readonly)]` - validate the field but never transform it
///
/// Container attributes:
/// * `#[record(rename_all = "PascalCase")]` - also `camelCase`, `snake_case`,
///   `SCREAMING_SNAKE_CASE`, `kebab-case`
///
/// ```ignore
/// #[derive(Record)]
/// #[record(rename_all = "PascalCase")]
/// struct SignUp {
///     #[validate("required min=3 max=20 alphanum")]
///     #[transform("trim lowercase")]
///     username: String,
///     #[validate("required email")]
///     email: String,
/// }
/// ```
#[proc_macro_derive(Record, attributes(validate, transform, record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
	record::derive_record(input)
}
