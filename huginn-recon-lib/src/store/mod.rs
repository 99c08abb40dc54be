//! Reference tables mapping implementation labels to known signal values
//!
//! One table per [`SignalKind`]. Lookups are exact string matches, inserts
//! are append-if-absent and best effort: a store that cannot be read yields
//! no labels, a store that cannot be written is skipped.

pub mod file;
pub mod memory;
pub mod record;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::ReferenceRecord;

use crate::signals::SignalKind;

pub trait ReferenceStore {
    /// Distinct labels whose record for `kind` carries exactly `value`, in
    /// table order
    fn lookup(&self, kind: SignalKind, value: &str) -> Vec<String>;

    /// Append `label;value` to the table for `kind` unless that exact pair
    /// is already stored. Returns `true` when a record was written.
    fn insert(&self, kind: SignalKind, label: &str, value: &str) -> bool;
}

impl<S: ReferenceStore + ?Sized> ReferenceStore for &S {
    fn lookup(&self, kind: SignalKind, value: &str) -> Vec<String> {
        (**self).lookup(kind, value)
    }

    fn insert(&self, kind: SignalKind, label: &str, value: &str) -> bool {
        (**self).insert(kind, label, value)
    }
}

impl<S: ReferenceStore + ?Sized> ReferenceStore for std::sync::Arc<S> {
    fn lookup(&self, kind: SignalKind, value: &str) -> Vec<String> {
        (**self).lookup(kind, value)
    }

    fn insert(&self, kind: SignalKind, label: &str, value: &str) -> bool {
        (**self).insert(kind, label, value)
    }
}

/// Labels of `records` matching `value`, first occurrence kept
pub(crate) fn matching_labels<'a, I>(records: I, value: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a ReferenceRecord>,
{
    let mut labels: Vec<String> = Vec::new();
    if value.is_empty() {
        return labels;
    }
    for record in records {
        if record.value == value && !labels.iter().any(|l| *l == record.label) {
            labels.push(record.label.clone());
        }
    }
    labels
}
