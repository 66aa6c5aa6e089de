//! Derive macros for pgmap
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod record;

/// Derive the `Fields` and `Record` traits for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use pgmap::Record;
///
/// #[derive(Debug, Default, Record)]
/// pub struct User {
///     #[sql("id/insert/update")]
///     pub id: i64,
///     pub name: String,
///     #[sql(embed)]
///     pub audit: Audit,
///     #[sql("role")]
///     pub roles: Vec<String>,
///     #[sql("-")]
///     pub scratch: String,
/// }
/// ```
///
/// # Attributes
///
/// - `#[sql("name")]` - Map field to column `name` in every context
/// - `#[sql("name/insert,update")]` - Same, but excluded from the listed contexts
/// - `#[sql("-")]` - Never map this field
/// - `#[sql(embed)]` - Expand the fields of a nested `Record` in place
/// - `#[sql(repeated)]` - Aggregate values from several rows; the default for `Vec<T>`
///   other than `Vec<u8>`
/// - `#[sql(scalar)]` - Map a byte vector spelled through an alias (`Vec<Byte>`) as one
///   `bytea` value. Other `Vec<T>` types have no scalar conversion.
///
/// Options combine: `#[sql("groups", repeated)]`. Only `pub` fields are mapped.
#[proc_macro_derive(Record, attributes(sql))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
