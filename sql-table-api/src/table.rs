//! This module contains the row mapping contract and the scanning primitives used to populate rows.

mod row;
mod scanner;

pub use self::row::{RowMapping, TableRow};
pub use self::scanner::{FromColumns, RowScanner, ScanError, ScanResult};
