use std::collections::VecDeque;

use crate::driver::{DriverResult, Rows};
use crate::table::{RowScanner, ScanError, ScanResult};
use crate::value::Value;

/// A buffered cursor over rows already fetched in memory.
///
/// Drivers which cannot stream rows out of a borrowed statement may collect them into a [`ResultSet`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pending: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
}

impl ResultSet {
    /// Creates a cursor positioned before the first of `rows`.
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self {
            pending: rows.into(),
            current: None,
        }
    }

    /// Returns the number of rows not visited yet.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl From<Vec<Vec<Value>>> for ResultSet {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        Self::new(rows)
    }
}

impl RowScanner for ResultSet {
    fn column_count(&self) -> ScanResult<usize> {
        self.current
            .as_ref()
            .map(Vec::len)
            .ok_or(ScanError::NoCurrentRow)
    }

    fn value(&self, index: usize) -> ScanResult<Value> {
        let row = self.current.as_ref().ok_or(ScanError::NoCurrentRow)?;
        row.get(index)
            .cloned()
            .ok_or(ScanError::ColumnOutOfRange {
                index,
                count: row.len(),
            })
    }
}

impl Rows for ResultSet {
    fn advance(&mut self) -> DriverResult<bool> {
        self.current = self.pending.pop_front();
        Ok(self.current.is_some())
    }
}
