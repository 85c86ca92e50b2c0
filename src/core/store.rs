//! The full, unfiltered result set of one list screen

use crate::core::record::Record;

/// Ordered records returned by the last successful fetch
///
/// Only ever replaced wholesale; views are derived from it, never written
/// back into it.
#[derive(Debug, Clone)]
pub struct ListStore<R> {
    records: Vec<R>,
}

impl<R> Default for ListStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> ListStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records` in fetch order
    pub fn from_records(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Replace the whole content
    pub fn replace(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Drop all records
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// All records, in fetch order
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Find a record by its identifier
    pub fn get(&self, id: i64) -> Option<&R> {
        self.records.iter().find(|r| r.record_id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
