//! Daily expense service
//!
//! Discretionary spending for a month measured against that month's daily
//! budget.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    DailyBudget, DailyExpense, DailyExpenseId, Money, Month, ProgressLevel, ProgressThresholds,
};
use crate::storage::Storage;

#[derive(Debug, Clone, Default)]
pub struct DailyExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
}

/// How a month's daily spending compares to its budget
#[derive(Debug, Clone)]
pub struct DailySummary {
    pub month: Month,
    pub budget: Money,
    pub spent: Money,
    /// `budget - spent`; negative when overspent
    pub remaining: Money,
    /// `spent / budget * 100`, not clamped; 0 without a budget
    pub progress: f64,
    pub level: ProgressLevel,
    pub expense_count: usize,
}

impl DailySummary {
    pub fn compute(
        month: Month,
        budget: Money,
        expenses: &[DailyExpense],
        thresholds: &ProgressThresholds,
    ) -> Self {
        let spent: Money = expenses.iter().map(|e| e.amount).sum();
        let progress = spent.percentage_of(budget);
        Self {
            month,
            budget,
            spent,
            remaining: budget - spent,
            progress,
            level: thresholds.level(progress),
            expense_count: expenses.len(),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

pub struct DailyExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> DailyExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Expenses in `month`, most recent date first
    pub fn list_by_month(&self, month: Month) -> FintrackResult<Vec<DailyExpense>> {
        self.storage.daily_expenses.get_by_month(month)
    }

    pub fn get(&self, id: DailyExpenseId) -> FintrackResult<Option<DailyExpense>> {
        self.storage.daily_expenses.get(id)
    }

    pub fn add(&self, description: &str, amount: Money, date: NaiveDate) -> FintrackResult<DailyExpense> {
        let id = self.storage.daily_expenses.next_id()?;
        let expense = DailyExpense::new(id, description.trim(), amount, date);
        expense
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.daily_expenses.upsert(expense.clone())?;
        self.storage.daily_expenses.save()?;

        self.storage.log_create(
            EntityType::DailyExpense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    pub fn update(&self, id: DailyExpenseId, changes: DailyExpenseUpdate) -> FintrackResult<DailyExpense> {
        let mut expense = self
            .storage
            .daily_expenses
            .get(id)?
            .ok_or_else(|| FintrackError::daily_expense_not_found(id.to_string()))?;
        let before = expense.clone();

        if let Some(description) = changes.description {
            expense.description = description.trim().to_string();
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        expense.updated_at = chrono::Utc::now();

        expense
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.daily_expenses.upsert(expense.clone())?;
        self.storage.daily_expenses.save()?;

        self.storage.log_update(
            EntityType::DailyExpense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    pub fn delete(&self, id: DailyExpenseId) -> FintrackResult<DailyExpense> {
        let expense = self
            .storage
            .daily_expenses
            .delete(id)?
            .ok_or_else(|| FintrackError::daily_expense_not_found(id.to_string()))?;
        self.storage.daily_expenses.save()?;

        self.storage.log_delete(
            EntityType::DailyExpense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// The month's daily budget; zero when not configured
    pub fn get_budget(&self, month: Month) -> FintrackResult<Money> {
        Ok(self
            .storage
            .daily_expenses
            .get_budget(month)?
            .map(|b| b.monthly_budget)
            .unwrap_or_default())
    }

    pub fn set_budget(&self, month: Month, amount: Money) -> FintrackResult<DailyBudget> {
        let budget = DailyBudget::new(month, amount);
        budget
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        let previous = self.storage.daily_expenses.get_budget(month)?;
        self.storage.daily_expenses.set_budget(budget.clone())?;
        self.storage.daily_expenses.save()?;

        match previous {
            Some(before) => self.storage.log_update(
                EntityType::DailyBudget,
                month.to_string(),
                None,
                &before,
                &budget,
            )?,
            None => self
                .storage
                .log_create(EntityType::DailyBudget, month.to_string(), None, &budget)?,
        }

        Ok(budget)
    }

    pub fn summary(&self, month: Month, thresholds: &ProgressThresholds) -> FintrackResult<DailySummary> {
        let expenses = self.list_by_month(month)?;
        let budget = self.get_budget(month)?;
        Ok(DailySummary::compute(month, budget, &expenses, thresholds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_storage;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn march() -> Month {
        Month::parse("2024-03").unwrap()
    }

    #[test]
    fn test_add_and_list_by_month() {
        let (_dir, storage) = test_storage();
        let service = DailyExpenseService::new(&storage);

        service.add("Coffee", Money::from_units(8_000), date(3, 2)).unwrap();
        service.add("Taxi", Money::from_units(25_000), date(3, 9)).unwrap();
        service.add("Lunch", Money::from_units(30_000), date(4, 1)).unwrap();

        let listed = service.list_by_month(march()).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].description, "Taxi");
    }

    #[test]
    fn test_validation() {
        let (_dir, storage) = test_storage();
        let service = DailyExpenseService::new(&storage);
        assert!(service.add("Coffee", Money::zero(), date(3, 1)).unwrap_err().is_validation());
        assert!(service.add("", Money::from_units(1), date(3, 1)).unwrap_err().is_validation());
        assert!(service
            .set_budget(march(), Money::from_units(-1))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_budget_defaults_to_zero() {
        let (_dir, storage) = test_storage();
        let service = DailyExpenseService::new(&storage);
        assert!(service.get_budget(march()).unwrap().is_zero());

        service.set_budget(march(), Money::from_units(400_000)).unwrap();
        assert_eq!(service.get_budget(march()).unwrap(), Money::from_units(400_000));
    }

    #[test]
    fn test_summary_progress_and_level() {
        let (_dir, storage) = test_storage();
        let service = DailyExpenseService::new(&storage);
        service.set_budget(march(), Money::from_units(1000)).unwrap();
        service.add("Groceries", Money::from_units(750), date(3, 5)).unwrap();

        let summary = service.summary(march(), &ProgressThresholds::daily()).unwrap();
        assert_eq!(summary.spent, Money::from_units(750));
        assert_eq!(summary.remaining, Money::from_units(250));
        assert_eq!(summary.progress, 75.0);
        assert_eq!(summary.level, ProgressLevel::Warning);

        service.add("Dinner", Money::from_units(450), date(3, 6)).unwrap();
        let summary = service.summary(march(), &ProgressThresholds::daily()).unwrap();
        assert_eq!(summary.progress, 120.0);
        assert_eq!(summary.level, ProgressLevel::Danger);
        assert!(summary.is_over_budget());
    }

    #[test]
    fn test_summary_without_budget() {
        let (_dir, storage) = test_storage();
        let service = DailyExpenseService::new(&storage);
        service.add("Coffee", Money::from_units(5), date(3, 5)).unwrap();

        let summary = service.summary(march(), &ProgressThresholds::daily()).unwrap();
        assert_eq!(summary.progress, 0.0);
        assert_eq!(summary.level, ProgressLevel::Normal);
        assert_eq!(summary.remaining, Money::from_units(-5));
    }

    #[test]
    fn test_update_moves_between_months() {
        let (_dir, storage) = test_storage();
        let service = DailyExpenseService::new(&storage);
        let expense = service.add("Coffee", Money::from_units(5), date(3, 31)).unwrap();

        service
            .update(
                expense.id,
                DailyExpenseUpdate {
                    date: Some(date(4, 1)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(service.list_by_month(march()).unwrap().is_empty());

        service.delete(expense.id).unwrap();
        assert!(service.get(expense.id).unwrap().is_none());
    }
}
