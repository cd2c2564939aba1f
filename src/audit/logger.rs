//! Append-only JSONL audit log

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{FintrackError, FintrackResult};

use super::entry::AuditEntry;

/// Writes one JSON object per line to the audit log
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry and flush immediately
    pub fn log(&self, entry: &AuditEntry) -> FintrackResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| FintrackError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| FintrackError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .and_then(|_| file.flush())
            .map_err(|e| FintrackError::Io(format!("Failed to write audit entry: {}", e)))?;

        tracing::trace!(
            operation = %entry.operation,
            entity = %entry.entity_type,
            id = %entry.entity_id,
            "audit entry written"
        );
        Ok(())
    }

    /// All entries, oldest first. Lines that fail to parse are skipped with a
    /// warning rather than making the whole log unreadable.
    pub fn read_all(&self) -> FintrackResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| FintrackError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                FintrackError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(line = line_num + 1, error = %e, "skipping bad audit line"),
            }
        }

        Ok(entries)
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> FintrackResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
