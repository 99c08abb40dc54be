use std::sync::{PoisonError, RwLock};

use ahash::AHashMap;

use super::record::ReferenceRecord;
use super::{matching_labels, ReferenceStore};
use crate::signals::SignalKind;

/// In-memory reference tables with the same contract as [`FileStore`](super::FileStore)
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<AHashMap<SignalKind, Vec<ReferenceRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row unconditionally, as if it had been written to the table
    pub fn with_record(self, kind: SignalKind, label: &str, value: &str) -> Self {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push(ReferenceRecord::new(label, value));
        self
    }

    pub fn records(&self, kind: SignalKind) -> Vec<ReferenceRecord> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }
}

impl ReferenceStore for MemoryStore {
    fn lookup(&self, kind: SignalKind, value: &str) -> Vec<String> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables
            .get(&kind)
            .map(|records| matching_labels(records, value))
            .unwrap_or_default()
    }

    fn insert(&self, kind: SignalKind, label: &str, value: &str) -> bool {
        let record = ReferenceRecord::new(label, value);
        if !record.is_storable() {
            return false;
        }
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let table = tables.entry(kind).or_default();
        if table.contains(&record) {
            return false;
        }
        table.push(record);
        true
    }
}
