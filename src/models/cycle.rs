//! Cycle model
//!
//! A cycle is a budgeted date range tied to a pocket. Expenses are recorded
//! against a cycle and the budget execution view compares them to its budget.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CycleId, PocketId};
use super::money::Money;
use super::pocket::default_active;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleValidationError {
    EmptyName,
    NegativeBudget,
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl std::fmt::Display for CycleValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Cycle name cannot be empty"),
            Self::NegativeBudget => write!(f, "Cycle budget cannot be negative"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "Cycle end date {} is before its start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for CycleValidationError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cycle {
    pub id: CycleId,
    pub pocket_id: PocketId,
    pub name: String,
    pub budget: Money,
    pub date_init: NaiveDate,
    pub date_end: NaiveDate,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cycle {
    pub fn new(
        id: CycleId,
        pocket_id: PocketId,
        name: impl Into<String>,
        budget: Money,
        date_init: NaiveDate,
        date_end: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            pocket_id,
            name: name.into(),
            budget,
            date_init,
            date_end,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `date` falls inside the cycle (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.date_init && date <= self.date_end
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CycleValidationError> {
        if self.name.trim().is_empty() {
            return Err(CycleValidationError::EmptyName);
        }
        if self.budget.is_negative() {
            return Err(CycleValidationError::NegativeBudget);
        }
        if self.date_end < self.date_init {
            return Err(CycleValidationError::EndBeforeStart {
                start: self.date_init,
                end: self.date_end,
            });
        }
        Ok(())
    }
}
