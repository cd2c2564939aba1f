//! Monthly salary (income) model
//!
//! One record per month. A month with no record reads as a zero salary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::month::Month;

/// Validation errors for salaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalaryValidationError {
    NegativeAmount,
}

impl std::fmt::Display for SalaryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Monthly salary cannot be negative"),
        }
    }
}

impl std::error::Error for SalaryValidationError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salary {
    pub month: Month,
    pub monthly_amount: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Salary {
    pub fn new(month: Month, monthly_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            month,
            monthly_amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// Placeholder for a month with nothing recorded
    pub fn zero(month: Month) -> Self {
        Self::new(month, Money::zero())
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.monthly_amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), SalaryValidationError> {
        if self.monthly_amount.is_negative() {
            return Err(SalaryValidationError::NegativeAmount);
        }
        Ok(())
    }
}
