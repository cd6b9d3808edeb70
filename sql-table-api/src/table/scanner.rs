use thiserror::Error;

use crate::driver::DriverError;
use crate::value::{ConversionError, FromValue, Value};

/// The result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// An enum representing the errors which can occur while reading a row.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The single-row query matched no rows.
    #[error("No rows in result set")]
    NoRows,
    /// The cursor is not positioned on a row.
    #[error("Cursor is not positioned on a row")]
    NoCurrentRow,
    /// The row has a different number of columns than expected.
    #[error("Expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    /// Tried to read a column past the end of the row.
    #[error("Column index {index} out of range ({count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },
    /// The column value could not be converted to the requested type.
    #[error("Column {column}: {source}")]
    Conversion {
        column: usize,
        #[source]
        source: ConversionError,
    },
    /// The driver failed while reading the row.
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

/// Positional access to the columns of the row a cursor is positioned on.
pub trait RowScanner {
    /// Returns the number of columns of the current row.
    fn column_count(&self) -> ScanResult<usize>;

    /// Returns the value of the column at `index` of the current row.
    fn value(&self, index: usize) -> ScanResult<Value>;
}

impl<'a> dyn RowScanner + 'a {
    /// Fails with [`ScanError::ColumnCount`] unless the current row has exactly `expected` columns.
    pub fn expect_columns(&self, expected: usize) -> ScanResult<()> {
        let found = self.column_count()?;
        if found != expected {
            return Err(ScanError::ColumnCount { expected, found });
        }
        Ok(())
    }

    /// Reads the column at `index` converted to `V`.
    pub fn get<V>(&self, index: usize) -> ScanResult<V>
    where
        V: FromValue,
    {
        V::from_value(self.value(index)?).map_err(|source| ScanError::Conversion {
            column: index,
            source,
        })
    }

    /// Scans the whole current row into `S`, usually a tuple with one element per column.
    ///
    /// ```rust
    /// use sql_table_api::driver::SingleRow;
    /// use sql_table_api::table::RowScanner;
    /// use sql_table_api::values;
    ///
    /// let row = SingleRow::new(values![1i64, "alice"]);
    /// let scanner: &dyn RowScanner = &row;
    /// let (id, name): (i64, String) = scanner.scan().unwrap();
    /// assert_eq!(id, 1);
    /// assert_eq!(name, "alice");
    /// ```
    pub fn scan<S>(&self) -> ScanResult<S>
    where
        S: FromColumns,
    {
        S::from_columns(self)
    }
}

/// Types built out of all the columns of a row.
pub trait FromColumns: Sized {
    /// Builds `Self` from the current row of `row`.
    fn from_columns(row: &dyn RowScanner) -> ScanResult<Self>;
}

// macro rules for implementing FromColumns for tuples
macro_rules! impl_from_columns_for_tuple {
    ($count:expr; $($ty:ident => $index:tt),+) => {
        impl<$($ty),+> FromColumns for ($($ty,)+)
        where
            $($ty: FromValue),+
        {
            fn from_columns(row: &dyn RowScanner) -> ScanResult<Self> {
                row.expect_columns($count)?;
                Ok(($(row.get::<$ty>($index)?,)+))
            }
        }
    };
}

impl_from_columns_for_tuple!(1; A => 0);
impl_from_columns_for_tuple!(2; A => 0, B => 1);
impl_from_columns_for_tuple!(3; A => 0, B => 1, C => 2);
impl_from_columns_for_tuple!(4; A => 0, B => 1, C => 2, D => 3);
impl_from_columns_for_tuple!(5; A => 0, B => 1, C => 2, D => 3, E => 4);
impl_from_columns_for_tuple!(6; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5);
impl_from_columns_for_tuple!(7; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6);
impl_from_columns_for_tuple!(8; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7);
impl_from_columns_for_tuple!(9; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8);
impl_from_columns_for_tuple!(10; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8, J => 9);
impl_from_columns_for_tuple!(11; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8, J => 9, K => 10);
impl_from_columns_for_tuple!(12; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7, I => 8, J => 9, K => 10, L => 11);

impl FromColumns for Vec<Value> {
    fn from_columns(row: &dyn RowScanner) -> ScanResult<Self> {
        (0..row.column_count()?).map(|index| row.value(index)).collect()
    }
}
