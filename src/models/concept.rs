//! Concept model
//!
//! A planned line item inside a pocket. The sum of a pocket's concepts is the
//! projected budget for new cycles on that pocket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ConceptId, PocketId};
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptValidationError {
    EmptyName,
    NegativeValue,
}

impl std::fmt::Display for ConceptValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Concept name cannot be empty"),
            Self::NegativeValue => write!(f, "Concept value cannot be negative"),
        }
    }
}

impl std::error::Error for ConceptValidationError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    pub id: ConceptId,
    pub pocket_id: PocketId,
    pub name: String,
    pub value: Money,
    #[serde(default)]
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Concept {
    pub fn new(id: ConceptId, pocket_id: PocketId, name: impl Into<String>, value: Money) -> Self {
        let now = Utc::now();
        Self {
            id,
            pocket_id,
            name: name.into(),
            value,
            paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_paid(&mut self, paid: bool) {
        self.paid = paid;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ConceptValidationError> {
        if self.name.trim().is_empty() {
            return Err(ConceptValidationError::EmptyName);
        }
        if self.value.is_negative() {
            return Err(ConceptValidationError::NegativeValue);
        }
        Ok(())
    }
}
