//! JSON file helpers
//!
//! Writes go to a sibling temp file that is synced and renamed over the
//! target, so a batch lands completely or not at all.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::OtbError;

fn storage_err(action: &str, path: &Path, err: impl std::fmt::Display) -> OtbError {
    OtbError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read JSON from a file, returning the default value if it doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, OtbError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), OtbError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let result = write_and_sync(&temp_path, data)
        .and_then(|_| fs::rename(&temp_path, path).map_err(|e| storage_err("replace", path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_sync<T: Serialize>(temp_path: &Path, data: &T) -> Result<(), OtbError> {
    let file = File::create(temp_path).map_err(|e| storage_err("create", temp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", temp_path, e))?;
    writer.flush().map_err(|e| storage_err("flush", temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", temp_path, e))
}
