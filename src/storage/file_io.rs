//! File I/O utilities with atomic writes
//!
//! Every data file is written to a sibling temp file first and then renamed
//! over the existing file, so a crash never leaves a half-written document.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FintrackError, FintrackResult};

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> FintrackError {
    FintrackError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> FintrackResult<T> {
    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Read JSON from a file, returning the default value if it doesn't exist yet
pub fn read_json<T, P>(path: P) -> FintrackResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "data file missing, using defaults");
        return Ok(T::default());
    }
    parse_file(path)
}

/// Read JSON from a file that must exist
pub fn read_json_required<T, P>(path: P) -> FintrackResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(FintrackError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

/// Write JSON to a file atomically (write to temp, sync, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> FintrackResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    // The temp file must live in the same directory for rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", path, e))?;
    writer.flush().map_err(|e| storage_err("flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", path, e)
    })?;

    tracing::debug!(path = %path.display(), "wrote data file");
    Ok(())
}

/// Check if a JSON file exists and parses
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    parse_file::<serde_json::Value>(path.as_ref()).is_ok()
}
