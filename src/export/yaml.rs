//! YAML Export functionality
//!
//! Exports the complete database to YAML for a human-readable backup.

use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# fintrack full export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| FintrackError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FintrackError::Export(e.to_string()))?;

    Ok(())
}
