//! Export module for fintrack
//!
//! Provides data export in multiple formats:
//! - CSV: daily and fixed expenses (spreadsheet-compatible)
//! - JSON: machine-readable full export
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_daily_expenses_csv, export_fixed_expenses_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
