#![crate_name = "sql_table_macros"]
#![crate_type = "lib"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Macros and derive for sql-table
//!
//! This crate provides procedural macros to automatically implement traits
//! required by `sql-table`.
//!
//! ## Provided Derive Macros
//!
//! - `TableRow`: Automatically implements the `TableRow` trait for structs.
//!

#![doc(html_playground_url = "https://play.rust-lang.org")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod table_row;
mod utils;

/// Automatically implements the `TableRow` trait for a struct.
///
/// This derive macro generates the two methods required by the `TableRow` trait:
///
/// - `fn populate(&mut self, row: &dyn RowScanner) -> ScanResult<()>`  
///   Reads one column per field, in declaration order.  
///   The row must have exactly as many columns as there are mapped fields.
///   Every column is read before any field is assigned, so on error `self` is left untouched.
///
/// - `fn fields(&self) -> Vec<Value>`  
///   Returns one value per field, in declaration order.
///
/// # What the macro generates
///
/// Given a struct like:
///
/// ```rust,ignore
/// #[derive(Default, TableRow)]
/// struct User {
///     id: i64,
///     name: String,
/// }
/// ```
///
/// The macro expands into:
///
/// ```rust,ignore
/// impl TableRow for User {
///     fn populate(&mut self, row: &dyn RowScanner) -> ScanResult<()> {
///         row.expect_columns(2)?;
///         let __column_0 = row.get::<i64>(0)?;
///         let __column_1 = row.get::<String>(1)?;
///         self.id = __column_0;
///         self.name = __column_1;
///         Ok(())
///     }
///
///     fn fields(&self) -> Vec<Value> {
///         vec![Value::from(self.id.clone()), Value::from(self.name.clone())]
///     }
/// }
/// ```
///
/// # Attributes
///
/// - `#[table_row(skip)]` on a field excludes it from both `populate` and `fields`;
///   the field keeps whatever value it had (usually its `Default`).
///
/// # Requirements
///
/// - Each mapped field type must implement `FromValue`, `Clone`, and `Into<Value>`.
/// - Only works on `struct`s with named fields; enums, unions and tuple structs are not supported.
#[proc_macro_derive(TableRow, attributes(table_row))]
pub fn derive_table_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    self::table_row::table_row(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
