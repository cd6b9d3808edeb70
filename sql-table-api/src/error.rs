use thiserror::Error;

use crate::driver::DriverError;
use crate::table::ScanError;

/// Table manager error type.
#[derive(Debug, Error)]
pub enum TableError {
    /// Failure reported by the connection layer (begin, commit, exec, query, ...).
    #[error("Connection error: {0}")]
    Connection(#[from] DriverError),
    /// Failure populating a row from a cursor.
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    /// The prepared statement failed for the row at `index` of a batch.
    #[error("Statement failed for row {index}: {source}")]
    Statement {
        index: usize,
        #[source]
        source: DriverError,
    },
    /// A batch failed and the transaction was rolled back.
    #[error("Transaction rolled back: {cause}")]
    RolledBack {
        #[source]
        cause: Box<TableError>,
    },
    /// A batch failed and the rollback failed too.
    #[error("Transaction rollback failed ({rollback}) after: {cause}")]
    RollbackFailed {
        #[source]
        cause: Box<TableError>,
        rollback: DriverError,
    },
}

impl TableError {
    /// Returns whether the error is the "no rows matched" condition of a single-row query.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TableError::Scan(ScanError::NoRows))
    }

    /// Returns the error which triggered a rollback, or `self` for any other error.
    pub fn cause(&self) -> &TableError {
        match self {
            TableError::RolledBack { cause } | TableError::RollbackFailed { cause, .. } => {
                cause.cause()
            }
            other => other,
        }
    }
}

/// Table manager result type.
pub type TableResult<T> = Result<T, TableError>;
