use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use fs2::FileExt;
use tracing::{debug, warn};

use super::record::ReferenceRecord;
use super::{matching_labels, ReferenceStore};
use crate::signals::SignalKind;

/// Reference tables stored as line-oriented files
///
/// The table for a kind lives at `<prefix><kind>.fdb`. The prefix is joined
/// verbatim, so `db/` points into a directory and `db/lab-` selects a family
/// of prefixed tables. Every lookup reads the whole table.
#[derive(Debug, Clone)]
pub struct FileStore {
    prefix: String,
}

enum AppendOutcome {
    Written,
    Present,
    Locked,
}

/// Exclusive lock on an open table, released on drop
struct TableLock {
    file: File,
}

impl Drop for TableLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl FileStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn table_path(&self, kind: SignalKind) -> PathBuf {
        PathBuf::from(format!("{}{}", self.prefix, kind.table_file()))
    }

    /// All records of the table for `kind`
    ///
    /// Rows are decoded one by one; a row that is not UTF-8 is read lossily
    /// and leaves the other rows intact.
    pub fn records(&self, kind: SignalKind) -> io::Result<Vec<ReferenceRecord>> {
        let contents = fs::read(self.table_path(kind))?;
        Ok(parse_table(&contents))
    }

    /// Append under an exclusive lock held for this one write
    ///
    /// The table must already exist; appends never create tables.
    fn append(&self, kind: SignalKind, record: &ReferenceRecord) -> io::Result<AppendOutcome> {
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(self.table_path(kind))?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.kind() == fs2::lock_contended_error().kind() {
                return Ok(AppendOutcome::Locked);
            }
            return Err(e);
        }
        let mut lock = TableLock { file };

        write_if_absent(&mut lock.file, record)
    }
}

fn write_if_absent(file: &mut File, record: &ReferenceRecord) -> io::Result<AppendOutcome> {
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;

    if parse_table(&contents).iter().any(|r| r == record) {
        return Ok(AppendOutcome::Present);
    }

    let mut line = String::with_capacity(
        record
            .label
            .len()
            .saturating_add(record.value.len())
            .saturating_add(3),
    );
    if contents.last().is_some_and(|b| *b != b'\n') {
        line.push('\n');
    }
    line.push_str(&record.to_string());
    line.push('\n');
    file.write_all(line.as_bytes())?;
    file.flush()?;
    Ok(AppendOutcome::Written)
}

fn parse_table(contents: &[u8]) -> Vec<ReferenceRecord> {
    contents
        .split(|b| *b == b'\n')
        .filter_map(|row| ReferenceRecord::parse_line(&String::from_utf8_lossy(row)))
        .collect()
}

impl ReferenceStore for FileStore {
    fn lookup(&self, kind: SignalKind, value: &str) -> Vec<String> {
        if value.is_empty() {
            return Vec::new();
        }
        match self.records(kind) {
            Ok(records) => matching_labels(&records, value),
            Err(e) => {
                debug!(%kind, path = %self.table_path(kind).display(), error = %e, "reference table unreadable");
                Vec::new()
            }
        }
    }

    fn insert(&self, kind: SignalKind, label: &str, value: &str) -> bool {
        let record = ReferenceRecord::new(label, value);
        if !record.is_storable() {
            return false;
        }
        match self.append(kind, &record) {
            Ok(AppendOutcome::Written) => {
                debug!(%kind, label, "reference record appended");
                true
            }
            Ok(AppendOutcome::Present) => false,
            Ok(AppendOutcome::Locked) => {
                debug!(%kind, label, "reference table busy, skipping append");
                false
            }
            Err(e) => {
                warn!(%kind, path = %self.table_path(kind).display(), error = %e, "reference table unwritable");
                false
            }
        }
    }
}
