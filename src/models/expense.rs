//! Expense model
//!
//! An expense is money spent against a cycle with a given payment type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CycleId, ExpenseId, PaymentTypeId, PocketId};
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NonPositiveValue,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NonPositiveValue => write!(f, "Expense value must be greater than 0"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub value: Money,
    pub cycle_id: CycleId,
    /// Copied from the cycle so listings don't need a join
    pub pocket_id: PocketId,
    pub payment_type_id: PaymentTypeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        name: impl Into<String>,
        value: Money,
        cycle_id: CycleId,
        pocket_id: PocketId,
        payment_type_id: PaymentTypeId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            value,
            cycle_id,
            pocket_id,
            payment_type_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        if !self.value.is_positive() {
            return Err(ExpenseValidationError::NonPositiveValue);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_must_be_positive() {
        let mut expense = Expense::new(
            ExpenseId::new(1),
            "Market",
            Money::from_units(85_000),
            CycleId::new(1),
            PocketId::new(2),
            PaymentTypeId::new(1),
        );
        assert!(expense.validate().is_ok());

        expense.value = Money::zero();
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NonPositiveValue)
        );
    }
}
