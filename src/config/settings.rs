//! User settings for fintrack
//!
//! Manages user preferences: currency symbol, the balance tolerance used by
//! the monthly summary, progress thresholds and month validation bounds.

use serde::{Deserialize, Serialize};

use super::paths::FintrackPaths;
use crate::error::FintrackError;
use crate::models::{Money, ProgressThresholds};

/// Inclusive year range accepted for `YYYY-MM` months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: 2020,
            max: 2030,
        }
    }
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Margin around zero inside which the month counts as balanced
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Money,

    /// Progress thresholds for the daily expenses budget
    #[serde(default = "ProgressThresholds::daily")]
    pub daily_thresholds: ProgressThresholds,

    /// Progress thresholds for hybrid fixed expenses
    #[serde(default = "ProgressThresholds::hybrid")]
    pub hybrid_thresholds: ProgressThresholds,

    /// Years accepted when parsing months
    #[serde(default)]
    pub year_bounds: YearBounds,

    /// Whether initial setup has been completed
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_balance_tolerance() -> Money {
    Money::from_units(1000)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            balance_tolerance: default_balance_tolerance(),
            daily_thresholds: ProgressThresholds::daily(),
            hybrid_thresholds: ProgressThresholds::hybrid(),
            year_bounds: YearBounds::default(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FintrackPaths) -> Result<Self, FintrackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FintrackError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FintrackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FintrackError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FintrackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            FintrackError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.balance_tolerance, Money::from_units(1000));
        assert_eq!(settings.daily_thresholds.warning, 70.0);
        assert_eq!(settings.hybrid_thresholds.danger, 100.0);
        assert_eq!(settings.year_bounds.min, 2020);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "COP ".to_string();
        settings.setup_completed = true;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "COP ");
        assert!(loaded.setup_completed);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.schema_version, 1);
        assert_eq!(loaded.year_bounds, YearBounds::default());
    }
}
