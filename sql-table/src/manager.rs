//! This module exposes the [`TableManager`], the [`SqlTable`] implementation over a driver [`Connection`].

use std::marker::PhantomData;

use sql_table_api::prelude::{
    Connection, RowMapping, Rows as _, SqlTable, Statement as _, TableError, TableResult,
    Transaction, Value,
};
use tracing::{debug, error, warn};

/// The table manager.
///
/// It serves as the entry point to read and write rows of type `T` through a shared [`Connection`]
/// `C`, using the [`RowMapping`] `R` to scan and bind rows. `R` defaults to `T` itself, which
/// is the mapping of any [`sql_table_api::table::TableRow`].
///
/// It provides the operations of [`SqlTable`]:
///
/// - [`SqlTable::query`] - Run a query and read all its rows.
/// - [`SqlTable::query_row`] - Run a query and read its first row.
/// - [`SqlTable::exec`] - Execute a statement.
/// - [`SqlTable::transaction`] - Apply a statement to a batch of rows atomically.
///
/// The manager only borrows the connection and holds no other state, so it is cheap to copy
/// and safe to share as long as the connection is.
pub struct TableManager<'c, C, T, R = T> {
    /// Connection the statements are run on.
    connection: &'c C,
    row: PhantomData<fn() -> (T, R)>,
}

impl<'c, C, T, R> TableManager<'c, C, T, R> {
    /// Creates a manager over the given connection.
    pub fn new(connection: &'c C) -> Self {
        Self {
            connection,
            row: PhantomData,
        }
    }

    /// Returns the connection the manager runs statements on.
    pub fn connection(&self) -> &'c C {
        self.connection
    }
}

impl<C, T, R> Clone for TableManager<'_, C, T, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, T, R> Copy for TableManager<'_, C, T, R> {}

impl<C, T, R> std::fmt::Debug for TableManager<'_, C, T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableManager")
            .field("row", &std::any::type_name::<T>())
            .field("mapping", &std::any::type_name::<R>())
            .finish()
    }
}

impl<C, T, R> TableManager<'_, C, T, R>
where
    T: Default,
    R: RowMapping<T>,
{
    /// Executes the prepared statement once per row.
    ///
    /// The statement is dropped when this returns, before the caller commits or rolls back.
    fn apply_batch<X>(tx: &X, sql: &str, rows: &[T]) -> TableResult<()>
    where
        X: Transaction,
    {
        let mut statement = tx.prepare(sql)?;
        for (index, row) in rows.iter().enumerate() {
            statement
                .exec(&R::fields(row))
                .map_err(|source| TableError::Statement { index, source })?;
        }

        Ok(())
    }
}

impl<C, T, R> SqlTable<T> for TableManager<'_, C, T, R>
where
    C: Connection,
    T: Default,
    R: RowMapping<T>,
{
    fn query(&self, sql: &str) -> TableResult<Vec<T>> {
        let mut cursor = self.connection.query(sql)?;

        let mut rows = Vec::new();
        while cursor.advance()? {
            let mut row = T::default();
            R::populate(&mut row, &cursor)?;
            rows.push(row);
        }
        debug!(sql, rows = rows.len(), "query completed");

        Ok(rows)
    }

    fn query_row(&self, sql: &str, args: &[Value]) -> TableResult<T> {
        let single_row = self.connection.query_row(sql, args)?;

        let mut row = T::default();
        R::populate(&mut row, &single_row)?;
        debug!(sql, "query row completed");

        Ok(row)
    }

    fn exec(&self, sql: &str, args: &[Value]) -> TableResult<()> {
        let affected = self.connection.exec(sql, args)?;
        debug!(sql, affected, "statement executed");

        Ok(())
    }

    fn transaction(&self, sql: &str, rows: &[T]) -> TableResult<()> {
        let tx = self.connection.begin()?;

        match Self::apply_batch(&tx, sql, rows) {
            Ok(()) => {
                tx.commit()?;
                debug!(sql, rows = rows.len(), "transaction committed");
                Ok(())
            }
            Err(cause) => {
                warn!(sql, error = %cause, "transaction failed; rolling back");
                match tx.rollback() {
                    Ok(()) => Err(TableError::RolledBack {
                        cause: Box::new(cause),
                    }),
                    Err(rollback) => {
                        error!(sql, error = %rollback, "rollback failed");
                        Err(TableError::RollbackFailed {
                            cause: Box::new(cause),
                            rollback,
                        })
                    }
                }
            }
        }
    }
}
