//! Export CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use super::parse_month;
use crate::config::settings::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::export::{
    export_daily_expenses_csv, export_fixed_expenses_csv, export_full_json, export_full_yaml,
};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Everything as JSON
    Json {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Everything as YAML
    Yaml {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Daily expenses as CSV
    Daily {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fixed expenses as CSV
    Fixed {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_output(output: Option<&PathBuf>) -> FintrackResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FintrackError::Export(format!("Cannot create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> FintrackResult<()> {
    let output = match &cmd {
        ExportCommands::Json { output, .. }
        | ExportCommands::Yaml { output }
        | ExportCommands::Daily { output, .. }
        | ExportCommands::Fixed { output, .. } => output.clone(),
    };
    let mut writer = open_output(output.as_ref())?;

    match cmd {
        ExportCommands::Json { compact, .. } => export_full_json(storage, &mut writer, !compact)?,
        ExportCommands::Yaml { .. } => export_full_yaml(storage, &mut writer)?,
        ExportCommands::Daily { month, .. } => {
            let month = month
                .as_deref()
                .map(|m| parse_month(Some(m), settings))
                .transpose()?;
            export_daily_expenses_csv(storage, month, &mut writer)?
        }
        ExportCommands::Fixed { month, .. } => {
            let month = month
                .as_deref()
                .map(|m| parse_month(Some(m), settings))
                .transpose()?;
            export_fixed_expenses_csv(storage, month, &mut writer)?
        }
    }

    writer
        .flush()
        .map_err(|e| FintrackError::Export(e.to_string()))?;

    if let Some(path) = output {
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}
