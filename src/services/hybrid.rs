//! Hybrid transaction service
//!
//! Transactions against a hybrid fixed expense's budget. A transaction can
//! never take the expense past its limit.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{FixedExpense, FixedExpenseId, HybridTransaction, HybridTransactionId, Money};
use crate::storage::Storage;

#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub transaction_date: Option<NaiveDate>,
}

pub struct HybridTransactionService<'a> {
    storage: &'a Storage,
}

/// Check that `amount` can be spent from `expense`, given `available` budget
fn check_amount(expense: &FixedExpense, amount: Money, available: Money) -> FintrackResult<()> {
    if !amount.is_positive() {
        return Err(FintrackError::Validation(
            "Transaction amount must be greater than 0".into(),
        ));
    }
    if amount > available {
        return Err(FintrackError::BudgetExceeded {
            concept: expense.concept_name.clone(),
            requested: amount,
            remaining: available,
        });
    }
    Ok(())
}

impl<'a> HybridTransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Transactions of a hybrid expense, most recent date first
    pub fn list(&self, expense_id: FixedExpenseId) -> FintrackResult<Vec<HybridTransaction>> {
        Ok(self.hybrid_expense(expense_id)?.transactions_newest_first())
    }

    pub fn add(
        &self,
        expense_id: FixedExpenseId,
        amount: Money,
        description: &str,
        transaction_date: NaiveDate,
    ) -> FintrackResult<HybridTransaction> {
        let mut expense = self.hybrid_expense(expense_id)?;
        check_amount(&expense, amount, expense.remaining())?;

        let id = self.storage.fixed_expenses.next_transaction_id()?;
        let transaction =
            HybridTransaction::new(id, expense.id, amount, description.trim(), transaction_date);
        expense.transactions.push(transaction.clone());
        expense.touch();

        self.storage.fixed_expenses.upsert(expense.clone())?;
        self.storage.fixed_expenses.save()?;

        self.storage.log_create(
            EntityType::HybridTransaction,
            transaction.id.to_string(),
            Some(expense.concept_name.clone()),
            &transaction,
        )?;
        tracing::debug!(
            expense = %expense.id,
            amount = %amount,
            remaining = %expense.remaining(),
            "hybrid transaction added"
        );

        Ok(transaction)
    }

    pub fn update(
        &self,
        transaction_id: HybridTransactionId,
        changes: TransactionUpdate,
    ) -> FintrackResult<HybridTransaction> {
        let mut expense = self.owner(transaction_id)?;
        let index = expense
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| FintrackError::hybrid_transaction_not_found(transaction_id.to_string()))?;
        let before = expense.transactions[index].clone();

        if let Some(amount) = changes.amount {
            // The transaction's own amount is available to itself
            let available = expense.remaining() + before.amount;
            check_amount(&expense, amount, available)?;
        }

        let transaction = &mut expense.transactions[index];
        if let Some(amount) = changes.amount {
            transaction.amount = amount;
        }
        if let Some(description) = changes.description {
            transaction.description = description.trim().to_string();
        }
        if let Some(date) = changes.transaction_date {
            transaction.transaction_date = date;
        }
        let after = transaction.clone();
        expense.touch();

        self.storage.fixed_expenses.upsert(expense.clone())?;
        self.storage.fixed_expenses.save()?;

        self.storage.log_update(
            EntityType::HybridTransaction,
            after.id.to_string(),
            Some(expense.concept_name.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    pub fn delete(&self, transaction_id: HybridTransactionId) -> FintrackResult<HybridTransaction> {
        let mut expense = self.owner(transaction_id)?;
        let index = expense
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| FintrackError::hybrid_transaction_not_found(transaction_id.to_string()))?;
        let removed = expense.transactions.remove(index);
        expense.touch();

        self.storage.fixed_expenses.upsert(expense.clone())?;
        self.storage.fixed_expenses.save()?;

        self.storage.log_delete(
            EntityType::HybridTransaction,
            removed.id.to_string(),
            Some(expense.concept_name.clone()),
            &removed,
        )?;

        Ok(removed)
    }

    fn hybrid_expense(&self, id: FixedExpenseId) -> FintrackResult<FixedExpense> {
        let expense = self
            .storage
            .fixed_expenses
            .get(id)?
            .ok_or_else(|| FintrackError::fixed_expense_not_found(id.to_string()))?;
        if !expense.is_hybrid() {
            return Err(FintrackError::Validation(format!(
                "'{}' is not a hybrid expense",
                expense.concept_name
            )));
        }
        Ok(expense)
    }

    fn owner(&self, transaction_id: HybridTransactionId) -> FintrackResult<FixedExpense> {
        self.storage
            .fixed_expenses
            .get_by_transaction(transaction_id)?
            .ok_or_else(|| FintrackError::hybrid_transaction_not_found(transaction_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;
    use crate::services::fixed_expense::NewFixedExpense;
    use crate::services::{test_storage, FixedExpenseService, PocketService};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn groceries(storage: &Storage, limit: i64) -> FixedExpense {
        let pocket = PocketService::new(storage).create("Food", None).unwrap();
        FixedExpenseService::new(storage)
            .create(NewFixedExpense::hybrid(
                pocket.id,
                "Groceries",
                Money::from_units(limit),
                Month::parse("2024-01").unwrap(),
            ))
            .unwrap()
    }

    #[test]
    fn test_add_within_budget() {
        let (_dir, storage) = test_storage();
        let expense = groceries(&storage, 800_000);
        let service = HybridTransactionService::new(&storage);

        service
            .add(expense.id, Money::from_units(200_000), "market", date(3))
            .unwrap();
        service
            .add(expense.id, Money::from_units(600_000), "big market", date(10))
            .unwrap();

        let stored = storage.fixed_expenses.get(expense.id).unwrap().unwrap();
        assert!(stored.remaining().is_zero());
        assert_eq!(stored.usage_percentage(), 100.0);

        let listed = service.list(expense.id).unwrap();
        assert_eq!(listed[0].transaction_date, date(10));
    }

    #[test]
    fn test_add_over_remaining_rejected() {
        let (_dir, storage) = test_storage();
        let expense = groceries(&storage, 1000);
        let service = HybridTransactionService::new(&storage);
        service
            .add(expense.id, Money::from_units(700), "a", date(1))
            .unwrap();

        let err = service
            .add(expense.id, Money::from_units(301), "b", date(2))
            .unwrap_err();
        match err {
            FintrackError::BudgetExceeded { remaining, requested, .. } => {
                assert_eq!(remaining, Money::from_units(300));
                assert_eq!(requested, Money::from_units(301));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = service
            .add(expense.id, Money::zero(), "c", date(2))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_only_hybrid_expenses_accept_transactions() {
        let (_dir, storage) = test_storage();
        let pocket = PocketService::new(&storage).create("Housing", None).unwrap();
        let rent = FixedExpenseService::new(&storage)
            .create(NewFixedExpense::fixed(
                pocket.id,
                "Rent",
                Money::from_units(100),
                1,
                Month::parse("2024-01").unwrap(),
            ))
            .unwrap();

        let err = HybridTransactionService::new(&storage)
            .add(rent.id, Money::from_units(1), "x", date(1))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_counts_own_amount_as_available() {
        let (_dir, storage) = test_storage();
        let expense = groceries(&storage, 1000);
        let service = HybridTransactionService::new(&storage);
        let txn = service
            .add(expense.id, Money::from_units(900), "a", date(1))
            .unwrap();

        let updated = service
            .update(
                txn.id,
                TransactionUpdate {
                    amount: Some(Money::from_units(1000)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, Money::from_units(1000));

        let err = service
            .update(
                txn.id,
                TransactionUpdate {
                    amount: Some(Money::from_units(1001)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, FintrackError::BudgetExceeded { .. }));
    }

    #[test]
    fn test_delete_restores_budget() {
        let (_dir, storage) = test_storage();
        let expense = groceries(&storage, 1000);
        let service = HybridTransactionService::new(&storage);
        let txn = service
            .add(expense.id, Money::from_units(400), "a", date(1))
            .unwrap();

        service.delete(txn.id).unwrap();
        let stored = storage.fixed_expenses.get(expense.id).unwrap().unwrap();
        assert_eq!(stored.remaining(), Money::from_units(1000));
        assert!(service.delete(txn.id).unwrap_err().is_not_found());
    }
}
