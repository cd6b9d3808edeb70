#![crate_name = "sql_table"]
#![crate_type = "lib"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # SQL Table
//!
//! A generic table manager: given a row type and its mapping contract, it runs queries,
//! single-row queries, statements and batch transactions without hand-written scanning code.
//!
//! ```rust
//! use sql_table::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq, TableRow)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! let connection = SqliteConnection::open_in_memory().unwrap();
//! let users: TableManager<'_, _, User> = TableManager::new(&connection);
//!
//! users
//!     .exec("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL)", &[])
//!     .unwrap();
//! users
//!     .transaction(
//!         "INSERT INTO users (id, name) VALUES (?1, ?2)",
//!         &[
//!             User { id: 1, name: "Alice".to_string() },
//!             User { id: 2, name: "Bob".to_string() },
//!         ],
//!     )
//!     .unwrap();
//!
//! let all = users.query("SELECT id, name FROM users ORDER BY id").unwrap();
//! assert_eq!(all.len(), 2);
//!
//! let bob = users
//!     .query_row("SELECT id, name FROM users WHERE id = ?1", &values![2i64])
//!     .unwrap();
//! assert_eq!(bob.name, "Bob");
//!
//! let missing = users.query_row("SELECT id, name FROM users WHERE id = ?1", &values![3i64]);
//! assert!(missing.unwrap_err().is_not_found());
//! ```

#![doc(html_playground_url = "https://play.rust-lang.org")]

// makes the crate accessible as `sql_table` in macros
extern crate self as sql_table;

pub mod manager;
pub mod prelude;
#[cfg(feature = "sqlite")]
pub mod sqlite;
#[cfg(test)]
mod tests;

pub use sql_table_api as api;
