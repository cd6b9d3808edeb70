//! Re-exports all the most commonly used items from this crate.

pub use sql_table_api::prelude::{
    Connection, ConversionError, DriverError, DriverResult, FromColumns, FromValue, ResultSet,
    RowMapping, RowScanner, Rows, ScanError, ScanResult, SingleRow, SqlTable, Statement,
    TableError, TableResult, TableRow, Transaction, Value,
};
pub use sql_table_api::values;
pub use sql_table_macros::TableRow;

pub use crate::manager::TableManager;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteConfig, SqliteConnection};
