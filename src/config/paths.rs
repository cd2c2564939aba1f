//! Path management for fintrack
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `FINTRACK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/fintrack` or `~/.config/fintrack`
//! 3. Otherwise the platform config directory from `directories`

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FintrackError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Manages all paths used by fintrack
#[derive(Debug, Clone)]
pub struct FintrackPaths {
    /// Base directory for all fintrack data
    base_dir: PathBuf,
}

impl FintrackPaths {
    /// Create a new FintrackPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, FintrackError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FintrackPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/fintrack/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/fintrack/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn pockets_file(&self) -> PathBuf {
        self.data_dir().join("pockets.json")
    }

    pub fn concepts_file(&self) -> PathBuf {
        self.data_dir().join("concepts.json")
    }

    pub fn cycles_file(&self) -> PathBuf {
        self.data_dir().join("cycles.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn payment_types_file(&self) -> PathBuf {
        self.data_dir().join("payment_types.json")
    }

    /// Fixed expenses, with their hybrid transactions nested
    pub fn fixed_expenses_file(&self) -> PathBuf {
        self.data_dir().join("fixed_expenses.json")
    }

    /// Daily expenses and the per-month daily budget
    pub fn daily_expenses_file(&self) -> PathBuf {
        self.data_dir().join("daily_expenses.json")
    }

    /// Monthly salary records
    pub fn income_file(&self) -> PathBuf {
        self.data_dir().join("income.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), FintrackError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FintrackError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FintrackError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if fintrack has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
fn resolve_default_path() -> Result<PathBuf, FintrackError> {
    #[cfg(not(windows))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg).join("fintrack"));
        }
        if let Ok(home) = std::env::var("HOME") {
            return Ok(PathBuf::from(home).join(".config").join("fintrack"));
        }
    }

    ProjectDirs::from("", "", "fintrack")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FintrackError::Config("Could not determine a configuration directory".into()))
}
