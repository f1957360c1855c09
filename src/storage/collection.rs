use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::domain::{Identifiable, Patch};
use crate::errors::{LedgerError, Result};

use super::json_backend::{quarantine_corrupt_file, read_records, write_records};

/// What happened when a collection was read from disk.
#[derive(Debug)]
pub enum LoadOutcome {
    /// No file yet; the collection starts empty.
    Missing,
    Loaded(usize),
    /// The file could not be parsed and the collection starts empty.
    Recovered {
        error: LedgerError,
        quarantined: Option<PathBuf>,
    },
}

/// An ordered set of records mirrored to one JSON file.
///
/// Mutations only touch memory; callers decide when to [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct PersistentCollection<T> {
    path: PathBuf,
    records: Vec<T>,
}

impl<T> PersistentCollection<T>
where
    T: Identifiable + Serialize + DeserializeOwned,
{
    /// An empty collection bound to `path` without touching the disk.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Reads the collection from `path`, starting empty when the file is
    /// missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> (Self, LoadOutcome) {
        let path = path.into();
        match read_records::<T>(&path) {
            Ok(Some(records)) => {
                let count = records.len();
                tracing::debug!(path = %path.display(), count, "loaded collection");
                (Self { path, records }, LoadOutcome::Loaded(count))
            }
            Ok(None) => (Self::empty(path), LoadOutcome::Missing),
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "unreadable collection file; starting empty"
                );
                let quarantined = match quarantine_corrupt_file(&path) {
                    Ok(copy) => {
                        tracing::warn!(
                            copy = %copy.display(),
                            "kept a copy of the unreadable file"
                        );
                        Some(copy)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "could not copy unreadable file aside");
                        None
                    }
                };
                (
                    Self::empty(path),
                    LoadOutcome::Recovered { error, quarantined },
                )
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.find_index_by_id(id).map(|index| &self.records[index])
    }

    pub fn append(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn find_index_by_id(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// Applies `patch` to the record at `index`; `None` if out of range.
    pub fn update_at<P: Patch<T>>(&mut self, index: usize, patch: &P) -> Option<&T> {
        let record = self.records.get_mut(index)?;
        patch.apply_to(record);
        Some(&*record)
    }

    /// Drops every record carrying `id` and returns how many went.
    pub fn remove_by_id(&mut self, id: Uuid) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        before - self.records.len()
    }

    pub fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// Rewrites the backing file with the full in-memory sequence.
    pub fn save(&self) -> Result<()> {
        write_records(&self.path, &self.records)?;
        tracing::debug!(
            path = %self.path.display(),
            count = self.records.len(),
            "saved collection"
        );
        Ok(())
    }
}
