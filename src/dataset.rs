//! An ordered, in-memory collection of records sharing one header.

use crate::Record;

/// Ordered records plus the header row they were read with.
///
/// Order is meaningful: it starts as input row order and is only ever
/// permuted by sorting. Stages never mutate a dataset in place; they build
/// a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Header names in input order, original casing preserved.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when at least one record carries `column`.
    ///
    /// A dataset without rows therefore has no columns to operate on.
    pub fn has_column(&self, column: &str) -> bool {
        self.records.iter().any(|r| r.contains(column))
    }

    /// A dataset with the same header and the given records.
    pub(crate) fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            columns: self.columns.clone(),
            records,
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
