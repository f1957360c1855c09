use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::core::utils::ensure_dir;
use crate::errors::{LedgerError, Result};

const TMP_SUFFIX: &str = "tmp";
const CORRUPT_SUFFIX: &str = "corrupt";
const CORRUPT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Reads a JSON array of records from `path`.
///
/// Returns `Ok(None)` when the file does not exist and
/// [`LedgerError::CorruptStorage`] when it exists but cannot be read or parsed.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(corrupt(path, err.to_string())),
    };
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|err| corrupt(path, err.to_string()))
}

/// Serializes `records` as a pretty JSON array and replaces `path` with it.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    write_json(path, records)
}

/// Stages `value` as pretty JSON next to `path`, then renames it into place.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Copies an unreadable data file aside so the next save does not destroy it.
pub fn quarantine_corrupt_file(path: &Path) -> Result<PathBuf> {
    let timestamp = Utc::now().format(CORRUPT_TIMESTAMP_FORMAT).to_string();
    let mut target = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}-{}", existing, CORRUPT_SUFFIX, timestamp),
        None => format!("{}-{}", CORRUPT_SUFFIX, timestamp),
    };
    target.set_extension(ext);
    fs::copy(path, &target)?;
    Ok(target)
}

fn corrupt(path: &Path, reason: String) -> LedgerError {
    LedgerError::CorruptStorage {
        path: path.to_path_buf(),
        reason,
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
