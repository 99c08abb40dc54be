//! Shared helpers for reference table tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use huginn_recon_lib::{FileStore, SignalKind};

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Write one table per `(kind, contents)` pair and return a store over them
pub fn write_tables(dir: &Path, tables: &[(SignalKind, &str)]) -> TestResult<FileStore> {
    let store = FileStore::new(format!("{}/", dir.display()));
    for (kind, contents) in tables {
        fs::write(store.table_path(*kind), contents)?;
    }
    Ok(store)
}

/// Create every table empty, as a fresh installation ships them
pub fn create_empty_tables(dir: &Path) -> TestResult<FileStore> {
    let store = FileStore::new(format!("{}/", dir.display()));
    for kind in SignalKind::ALL {
        fs::write(store.table_path(kind), "")?;
    }
    Ok(store)
}
