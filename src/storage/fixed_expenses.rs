//! Fixed expense repository (`fixed_expenses.json`)
//!
//! Hybrid transactions are stored inside their parent expense, so this file
//! carries two id counters: one for expenses and one for transactions.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{FintrackError, FintrackResult};
use crate::models::{FixedExpense, FixedExpenseId, HybridTransactionId, Month, PocketId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct FixedExpenseData {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    next_transaction_id: u64,
    #[serde(default)]
    expenses: Vec<FixedExpense>,
}

struct Counters {
    expense: u64,
    transaction: u64,
}

pub struct FixedExpenseRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<FixedExpenseId, FixedExpense>>,
    counters: RwLock<Counters>,
}

fn lock_err(e: impl std::fmt::Display) -> FintrackError {
    FintrackError::Storage(format!("Failed to acquire lock: {}", e))
}

impl FixedExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
            counters: RwLock::new(Counters {
                expense: 1,
                transaction: 1,
            }),
        }
    }

    pub fn load(&self) -> FintrackResult<()> {
        let file_data: FixedExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut counters = self.counters.write().map_err(lock_err)?;

        let max_expense = file_data
            .expenses
            .iter()
            .map(|e| e.id.value())
            .max()
            .unwrap_or(0);
        let max_txn = file_data
            .expenses
            .iter()
            .flat_map(|e| e.transactions.iter().map(|t| t.id.value()))
            .max()
            .unwrap_or(0);
        counters.expense = file_data.next_id.max(max_expense + 1);
        counters.transaction = file_data.next_transaction_id.max(max_txn + 1);

        data.clear();
        for expense in file_data.expenses {
            data.insert(expense.id, expense);
        }
        Ok(())
    }

    pub fn save(&self) -> FintrackResult<()> {
        let data = self.data.read().map_err(lock_err)?;
        let counters = self.counters.read().map_err(lock_err)?;

        let file_data = FixedExpenseData {
            next_id: counters.expense,
            next_transaction_id: counters.transaction,
            expenses: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn next_id(&self) -> FintrackResult<FixedExpenseId> {
        let mut counters = self.counters.write().map_err(lock_err)?;
        let id = counters.expense;
        counters.expense += 1;
        Ok(FixedExpenseId::new(id))
    }

    pub fn next_transaction_id(&self) -> FintrackResult<HybridTransactionId> {
        let mut counters = self.counters.write().map_err(lock_err)?;
        let id = counters.transaction;
        counters.transaction += 1;
        Ok(HybridTransactionId::new(id))
    }

    pub fn get(&self, id: FixedExpenseId) -> FintrackResult<Option<FixedExpense>> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    pub fn get_all(&self) -> FintrackResult<Vec<FixedExpense>> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.values().cloned().collect())
    }

    pub fn get_by_month(&self, month: Month) -> FintrackResult<Vec<FixedExpense>> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.values().filter(|e| e.month == month).cloned().collect())
    }

    pub fn any_in_pocket(&self, pocket_id: PocketId) -> FintrackResult<bool> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.values().any(|e| e.pocket_id == pocket_id))
    }

    /// The expense that owns a given hybrid transaction
    pub fn get_by_transaction(
        &self,
        transaction_id: HybridTransactionId,
    ) -> FintrackResult<Option<FixedExpense>> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data
            .values()
            .find(|e| e.transactions.iter().any(|t| t.id == transaction_id))
            .cloned())
    }

    pub fn upsert(&self, expense: FixedExpense) -> FintrackResult<()> {
        let mut data = self.data.write().map_err(lock_err)?;
        data.insert(expense.id, expense);
        Ok(())
    }

    pub fn delete(&self, id: FixedExpenseId) -> FintrackResult<Option<FixedExpense>> {
        let mut data = self.data.write().map_err(lock_err)?;
        Ok(data.remove(&id))
    }

    pub fn count(&self) -> FintrackResult<usize> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HybridTransaction, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn repo(dir: &TempDir) -> FixedExpenseRepository {
        FixedExpenseRepository::new(dir.path().join("fixed_expenses.json"))
    }

    #[test]
    fn test_transactions_persist_nested() {
        let dir = TempDir::new().unwrap();
        let month = Month::parse("2024-01").unwrap();
        let r = repo(&dir);

        let mut groceries = FixedExpense::new_hybrid(
            r.next_id().unwrap(),
            PocketId::new(3),
            "Groceries",
            Money::from_units(800),
            month,
        );
        let txn_id = r.next_transaction_id().unwrap();
        groceries.transactions.push(HybridTransaction::new(
            txn_id,
            groceries.id,
            Money::from_units(120),
            "market",
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        ));
        r.upsert(groceries).unwrap();
        r.save().unwrap();

        let reloaded = repo(&dir);
        reloaded.load().unwrap();
        let owner = reloaded.get_by_transaction(txn_id).unwrap().unwrap();
        assert_eq!(owner.concept_name, "Groceries");
        assert_eq!(owner.current_spent(), Money::from_units(120));
        assert_eq!(reloaded.next_transaction_id().unwrap().value(), 2);
        assert_eq!(reloaded.next_id().unwrap().value(), 2);
    }

    #[test]
    fn test_get_by_month() {
        let dir = TempDir::new().unwrap();
        let r = repo(&dir);
        let jan = Month::parse("2024-01").unwrap();
        for month in [jan, jan, jan.next()] {
            let expense = FixedExpense::new_fixed(
                r.next_id().unwrap(),
                PocketId::new(1),
                "Rent",
                Money::from_units(100),
                5,
                month,
            );
            r.upsert(expense).unwrap();
        }

        assert_eq!(r.get_by_month(jan).unwrap().len(), 2);
        assert_eq!(r.get_by_month(jan.next()).unwrap().len(), 1);
        assert!(r.any_in_pocket(PocketId::new(1)).unwrap());
        assert!(!r.any_in_pocket(PocketId::new(2)).unwrap());
    }
}
