//! Prelude exposes all the types for `sql-table-api` crate.

pub use crate::driver::{
    Connection, DriverError, DriverResult, ResultSet, Rows, SingleRow, Statement, Transaction,
};
pub use crate::error::{TableError, TableResult};
pub use crate::sql_table::SqlTable;
pub use crate::table::{FromColumns, RowMapping, RowScanner, ScanError, ScanResult, TableRow};
pub use crate::value::{ConversionError, FromValue, Value};
pub use crate::values;
