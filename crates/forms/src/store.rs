//! Record store and filter view
//!
//! Append-only, in-memory, demo-scale. The visible subset is a derived
//! view recomputed from the full store on every read; there is no
//! incremental index. Interior locks keep the store shareable across
//! sessions and already serialize `append` if the host ever moves to a
//! multi-threaded runtime.

use parking_lot::RwLock;
use tracing::debug;

use playground_core::Record;

/// Ordered, append-only collection of submitted records plus a live
/// substring filter over the designated display field
pub struct RecordStore {
    display_field: String,
    records: RwLock<Vec<Record>>,
    filter: RwLock<String>,
}

impl RecordStore {
    /// Create a store whose filter matches against `display_field`
    pub fn new(display_field: &str) -> Self {
        Self {
            display_field: display_field.to_string(),
            records: RwLock::new(Vec::new()),
            filter: RwLock::new(String::new()),
        }
    }

    /// Field the filter matches records against
    pub fn display_field(&self) -> &str {
        &self.display_field
    }

    /// Append a record. Insertion order is preserved and is the only
    /// ordering guarantee; duplicate contents are allowed.
    pub fn append(&self, record: Record) {
        debug!(record = record.id(), form = record.form(), "record appended");
        self.records.write().push(record);
    }

    /// All records in insertion order
    pub fn records(&self) -> Vec<Record> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Update the filter term. Pure state change; the store itself is
    /// untouched.
    pub fn set_filter_term(&self, term: &str) {
        *self.filter.write() = term.to_string();
    }

    pub fn filter_term(&self) -> String {
        self.filter.read().clone()
    }

    pub fn clear_filter(&self) {
        self.filter.write().clear();
    }

    /// Records whose display field contains the filter term,
    /// case-insensitively. Recomputed from the full store on each call.
    pub fn visible_records(&self) -> Vec<Record> {
        let term = self.filter.read().to_lowercase();
        self.records
            .read()
            .iter()
            .filter(|record| {
                let display = record
                    .get(&self.display_field)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                display.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }
}
