//! Pocket model
//!
//! A pocket is a named expense category. Cycles, concepts and fixed expenses
//! all hang off a pocket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::PocketId;

/// Validation errors for pockets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PocketValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl std::fmt::Display for PocketValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Pocket name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Pocket name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for PocketValidationError {}

const MAX_NAME_LEN: usize = 50;

/// A named expense category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pocket {
    pub id: PocketId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Inactive pockets stay around for history but are hidden from pickers
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) fn default_active() -> bool {
    true
}

impl Pocket {
    pub fn new(id: PocketId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: String::new(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.updated_at = Utc::now();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), PocketValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PocketValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(PocketValidationError::NameTooLong(name.chars().count()));
        }
        Ok(())
    }
}
