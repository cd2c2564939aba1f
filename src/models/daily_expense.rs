//! Daily (discretionary) expenses and the per-month daily budget

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::DailyExpenseId;
use super::money::Money;
use super::month::Month;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount,
    NegativeBudget,
}

impl std::fmt::Display for DailyExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Amount must be greater than 0"),
            Self::NegativeBudget => write!(f, "Daily budget cannot be negative"),
        }
    }
}

impl std::error::Error for DailyExpenseValidationError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyExpense {
    pub id: DailyExpenseId,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyExpense {
    pub fn new(
        id: DailyExpenseId,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            description: description.into(),
            amount,
            date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    pub fn validate(&self) -> Result<(), DailyExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(DailyExpenseValidationError::EmptyDescription);
        }
        if !self.amount.is_positive() {
            return Err(DailyExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

/// Budget for daily spending in one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBudget {
    pub month: Month,
    pub monthly_budget: Money,
    pub updated_at: DateTime<Utc>,
}

impl DailyBudget {
    pub fn new(month: Month, monthly_budget: Money) -> Self {
        Self {
            month,
            monthly_budget,
            updated_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DailyExpenseValidationError> {
        if self.monthly_budget.is_negative() {
            return Err(DailyExpenseValidationError::NegativeBudget);
        }
        Ok(())
    }
}
