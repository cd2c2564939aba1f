//! Daily expense repository (`daily_expenses.json`)
//!
//! Holds both the daily expenses and the per-month daily budget configs.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{FintrackError, FintrackResult};
use crate::models::{DailyBudget, DailyExpense, DailyExpenseId, Month};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct DailyExpenseData {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    expenses: Vec<DailyExpense>,
    #[serde(default)]
    budgets: Vec<DailyBudget>,
}

pub struct DailyExpenseRepository {
    path: PathBuf,
    expenses: RwLock<BTreeMap<DailyExpenseId, DailyExpense>>,
    budgets: RwLock<HashMap<Month, DailyBudget>>,
    next_id: RwLock<u64>,
}

fn lock_err(e: impl std::fmt::Display) -> FintrackError {
    FintrackError::Storage(format!("Failed to acquire lock: {}", e))
}

impl DailyExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            expenses: RwLock::new(BTreeMap::new()),
            budgets: RwLock::new(HashMap::new()),
            next_id: RwLock::new(1),
        }
    }

    pub fn load(&self) -> FintrackResult<()> {
        let file_data: DailyExpenseData = read_json(&self.path)?;

        let mut expenses = self.expenses.write().map_err(lock_err)?;
        let mut budgets = self.budgets.write().map_err(lock_err)?;
        let mut next_id = self.next_id.write().map_err(lock_err)?;

        let highest = file_data
            .expenses
            .iter()
            .map(|e| e.id.value())
            .max()
            .unwrap_or(0);
        *next_id = file_data.next_id.max(highest + 1);

        expenses.clear();
        for expense in file_data.expenses {
            expenses.insert(expense.id, expense);
        }

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.month, budget);
        }
        Ok(())
    }

    pub fn save(&self) -> FintrackResult<()> {
        let expenses = self.expenses.read().map_err(lock_err)?;
        let budgets = self.budgets.read().map_err(lock_err)?;
        let next_id = self.next_id.read().map_err(lock_err)?;

        let mut budget_list: Vec<_> = budgets.values().cloned().collect();
        budget_list.sort_by_key(|b| b.month);

        let file_data = DailyExpenseData {
            next_id: *next_id,
            expenses: expenses.values().cloned().collect(),
            budgets: budget_list,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn next_id(&self) -> FintrackResult<DailyExpenseId> {
        let mut next_id = self.next_id.write().map_err(lock_err)?;
        let id = *next_id;
        *next_id += 1;
        Ok(DailyExpenseId::new(id))
    }

    pub fn get(&self, id: DailyExpenseId) -> FintrackResult<Option<DailyExpense>> {
        let expenses = self.expenses.read().map_err(lock_err)?;
        Ok(expenses.get(&id).cloned())
    }

    pub fn get_all(&self) -> FintrackResult<Vec<DailyExpense>> {
        let expenses = self.expenses.read().map_err(lock_err)?;
        Ok(expenses.values().cloned().collect())
    }

    /// Expenses dated in `month`, most recent date first
    pub fn get_by_month(&self, month: Month) -> FintrackResult<Vec<DailyExpense>> {
        let expenses = self.expenses.read().map_err(lock_err)?;
        let mut list: Vec<_> = expenses
            .values()
            .filter(|e| month.contains(e.date))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    pub fn upsert(&self, expense: DailyExpense) -> FintrackResult<()> {
        let mut expenses = self.expenses.write().map_err(lock_err)?;
        expenses.insert(expense.id, expense);
        Ok(())
    }

    pub fn delete(&self, id: DailyExpenseId) -> FintrackResult<Option<DailyExpense>> {
        let mut expenses = self.expenses.write().map_err(lock_err)?;
        Ok(expenses.remove(&id))
    }

    pub fn get_budget(&self, month: Month) -> FintrackResult<Option<DailyBudget>> {
        let budgets = self.budgets.read().map_err(lock_err)?;
        Ok(budgets.get(&month).cloned())
    }

    pub fn get_all_budgets(&self) -> FintrackResult<Vec<DailyBudget>> {
        let budgets = self.budgets.read().map_err(lock_err)?;
        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by_key(|b| b.month);
        Ok(list)
    }

    pub fn set_budget(&self, budget: DailyBudget) -> FintrackResult<()> {
        let mut budgets = self.budgets.write().map_err(lock_err)?;
        budgets.insert(budget.month, budget);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_listing_is_date_descending() {
        let dir = TempDir::new().unwrap();
        let repo = DailyExpenseRepository::new(dir.path().join("daily_expenses.json"));
        for (desc, d) in [
            ("Coffee", date(2024, 1, 3)),
            ("Taxi", date(2024, 1, 20)),
            ("Lunch", date(2024, 2, 1)),
        ] {
            let expense = DailyExpense::new(repo.next_id().unwrap(), desc, Money::from_units(10), d);
            repo.upsert(expense).unwrap();
        }

        let jan = repo.get_by_month(Month::parse("2024-01").unwrap()).unwrap();
        let names: Vec<_> = jan.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["Taxi", "Coffee"]);
    }

    #[test]
    fn test_budgets_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("daily_expenses.json");
        let month = Month::parse("2024-03").unwrap();

        let repo = DailyExpenseRepository::new(path.clone());
        repo.set_budget(DailyBudget::new(month, Money::from_units(400_000)))
            .unwrap();
        repo.save().unwrap();

        let reloaded = DailyExpenseRepository::new(path);
        reloaded.load().unwrap();
        let budget = reloaded.get_budget(month).unwrap().unwrap();
        assert_eq!(budget.monthly_budget, Money::from_units(400_000));
        assert!(reloaded.get_budget(month.next()).unwrap().is_none());
    }
}
