//! This module defines the capabilities a database driver must provide to be used by a table manager.
//!
//! All the operations are synchronous and blocking. Resources are released on [`Drop`]:
//! dropping a [`Rows`] closes the cursor, dropping a [`Statement`] closes the statement,
//! and dropping a [`Transaction`] which was neither committed nor rolled back must roll it back.

mod result_set;
mod single_row;

use std::error::Error as StdError;

use thiserror::Error;

pub use self::result_set::ResultSet;
pub use self::single_row::SingleRow;
use crate::table::RowScanner;
use crate::value::Value;

/// The result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// An enum representing the errors reported by a database driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A constraint (UNIQUE, CHECK, FOREIGN KEY, NOT NULL, ...) rejected the statement.
    #[error("Constraint violation: {0}")]
    Constraint(String),
    /// Any other failure of the underlying database.
    #[error("{0}")]
    Backend(Box<dyn StdError + Send + Sync>),
}

impl DriverError {
    /// Wraps any error (or message) reported by the underlying database.
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Backend(err.into())
    }

    /// Returns whether the error is a constraint violation.
    pub fn is_constraint(&self) -> bool {
        matches!(self, DriverError::Constraint(_))
    }
}

/// A handle to a database, from which queries are run and transactions are started.
///
/// Every method takes `&self`: a handle is expected to be shared (e.g. a pool),
/// and its own concurrency guarantees are the only ones callers get.
pub trait Connection {
    /// The cursor type returned by [`Connection::query`].
    type Rows<'c>: Rows
    where
        Self: 'c;
    /// The transaction type returned by [`Connection::begin`].
    type Transaction<'c>: Transaction
    where
        Self: 'c;

    /// Runs a query without bind arguments and returns a cursor over its rows.
    fn query(&self, sql: &str) -> DriverResult<Self::Rows<'_>>;

    /// Runs a query with positional bind arguments and returns its first row.
    ///
    /// When nothing matches, an empty [`SingleRow`] is returned; reading from it fails with
    /// [`crate::table::ScanError::NoRows`].
    fn query_row(&self, sql: &str, args: &[Value]) -> DriverResult<SingleRow>;

    /// Executes a statement with positional bind arguments and returns the number of affected rows.
    fn exec(&self, sql: &str, args: &[Value]) -> DriverResult<u64>;

    /// Begins a new transaction.
    fn begin(&self) -> DriverResult<Self::Transaction<'_>>;
}

/// A unit of work on a [`Connection`].
pub trait Transaction: Sized {
    /// The prepared statement type returned by [`Transaction::prepare`].
    type Statement<'t>: Statement
    where
        Self: 't;

    /// Prepares a statement within the transaction.
    ///
    /// The statement borrows the transaction, so it must be dropped before commit or rollback.
    fn prepare(&self, sql: &str) -> DriverResult<Self::Statement<'_>>;

    /// Commits the transaction.
    fn commit(self) -> DriverResult<()>;

    /// Rolls back the transaction.
    fn rollback(self) -> DriverResult<()>;
}

/// A prepared statement, executed repeatedly with different arguments.
pub trait Statement {
    /// Executes the statement with positional bind arguments and returns the number of affected rows.
    fn exec(&mut self, args: &[Value]) -> DriverResult<u64>;
}

/// A cursor over the rows of a query.
///
/// The cursor starts before the first row; the current row is read through [`RowScanner`].
pub trait Rows: RowScanner {
    /// Moves to the next row. Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> DriverResult<bool>;
}
