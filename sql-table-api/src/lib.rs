#![crate_name = "sql_table_api"]
#![crate_type = "lib"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # SQL Table API
//!
//! This crate exposes the contracts shared between `sql-table` and its users:
//!
//! - the [`value::Value`] model exchanged with the database driver;
//! - the row mapping contract ([`table::TableRow`] and [`table::RowMapping`]);
//! - the driver traits ([`driver::Connection`], [`driver::Transaction`], [`driver::Statement`], [`driver::Rows`]);
//! - the [`sql_table::SqlTable`] trait and the error taxonomy.
//!
//! A database driver only needs this crate to be usable with `sql-table`.

#![doc(html_playground_url = "https://play.rust-lang.org")]

pub mod driver;
pub mod error;
pub mod prelude;
pub mod sql_table;
pub mod table;
pub mod value;
