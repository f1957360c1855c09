#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use household_ledger::core::LedgerStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Opens a store over a fresh data directory, returning both.
pub fn setup_store() -> (LedgerStore, PathBuf) {
    let dir = test_dir();
    (LedgerStore::open_in(&dir), dir)
}
