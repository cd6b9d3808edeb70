use crate::table::{RowScanner, ScanError, ScanResult};
use crate::value::Value;

/// The result of a single-row query.
///
/// It holds the first matching row, if any. Reading from an empty [`SingleRow`] fails with
/// [`ScanError::NoRows`], which is how "no rows matched" reaches the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleRow(Option<Vec<Value>>);

impl SingleRow {
    /// Creates a [`SingleRow`] holding the given column values.
    pub fn new(values: Vec<Value>) -> Self {
        Self(Some(values))
    }

    /// Creates a [`SingleRow`] for a query which matched no rows.
    pub fn empty() -> Self {
        Self(None)
    }

    /// Returns whether the query matched no rows.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<Vec<Value>>> for SingleRow {
    fn from(values: Option<Vec<Value>>) -> Self {
        Self(values)
    }
}

impl RowScanner for SingleRow {
    fn column_count(&self) -> ScanResult<usize> {
        self.0.as_ref().map(Vec::len).ok_or(ScanError::NoRows)
    }

    fn value(&self, index: usize) -> ScanResult<Value> {
        let row = self.0.as_ref().ok_or(ScanError::NoRows)?;
        row.get(index)
            .cloned()
            .ok_or(ScanError::ColumnOutOfRange {
                index,
                count: row.len(),
            })
    }
}
