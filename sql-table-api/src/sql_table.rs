use crate::error::TableResult;
use crate::value::Value;

/// This trait defines the operations available on a table of rows of type `T`.
pub trait SqlTable<T> {
    /// Runs a query and returns all its rows.
    ///
    /// # Arguments
    ///
    /// - `sql` - The complete query; it takes no bind arguments, so any parameter must already be embedded.
    ///
    /// # Returns
    ///
    /// Every row of the result set in cursor order, or the first error. No partial result is ever returned.
    fn query(&self, sql: &str) -> TableResult<Vec<T>>;

    /// Runs a query and returns its first row.
    ///
    /// # Arguments
    ///
    /// - `sql` - The query.
    /// - `args` - Positional bind arguments.
    ///
    /// # Returns
    ///
    /// The first row; when nothing matches, an error for which
    /// [`crate::error::TableError::is_not_found`] is `true`.
    fn query_row(&self, sql: &str, args: &[Value]) -> TableResult<T>;

    /// Executes a statement.
    ///
    /// # Arguments
    ///
    /// - `sql` - The statement.
    /// - `args` - Positional bind arguments.
    fn exec(&self, sql: &str, args: &[Value]) -> TableResult<()>;

    /// Executes a statement template once per row, within a single transaction.
    ///
    /// # Arguments
    ///
    /// - `sql` - The statement template; its parameters are bound to each row's fields.
    /// - `rows` - The rows to apply, in order.
    ///
    /// Either every row is committed, or the transaction is rolled back and the error which caused
    /// the rollback is returned.
    fn transaction(&self, sql: &str, rows: &[T]) -> TableResult<()>;
}
