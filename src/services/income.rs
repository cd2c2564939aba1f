//! Income service
//!
//! Monthly salary plus the "financial configuration" view of a month: salary,
//! the fixed expenses, the pockets they use and the daily budget.

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{DailyBudget, FixedExpense, Money, Month, Pocket, Salary};
use crate::storage::Storage;

/// Everything configured for one month
#[derive(Debug, Clone)]
pub struct FinancialConfiguration {
    pub month: Month,
    pub salary: Salary,
    /// Pockets referenced by the month's fixed expenses
    pub pockets: Vec<Pocket>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub daily_budget: DailyBudget,
}

pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Salary for a month; a zero salary when none is recorded
    pub fn get_salary(&self, month: Month) -> FintrackResult<Salary> {
        Ok(self
            .storage
            .income
            .get_for_month(month)?
            .unwrap_or_else(|| Salary::zero(month)))
    }

    pub fn list_salaries(&self) -> FintrackResult<Vec<Salary>> {
        self.storage.income.get_all()
    }

    pub fn set_salary(&self, month: Month, amount: Money) -> FintrackResult<Salary> {
        let existing = self.storage.income.get_for_month(month)?;

        let salary = match &existing {
            Some(current) => {
                let mut salary = current.clone();
                salary.set_amount(amount);
                salary
            }
            None => Salary::new(month, amount),
        };
        salary
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.income.upsert(salary.clone())?;
        self.storage.income.save()?;

        match existing {
            Some(before) => self.storage.log_update(
                EntityType::Salary,
                month.to_string(),
                None,
                &before,
                &salary,
            )?,
            None => self
                .storage
                .log_create(EntityType::Salary, month.to_string(), None, &salary)?,
        }

        Ok(salary)
    }

    pub fn financial_configuration(&self, month: Month) -> FintrackResult<FinancialConfiguration> {
        let salary = self.get_salary(month)?;
        let fixed_expenses = self.storage.fixed_expenses.get_by_month(month)?;

        let mut pocket_ids: Vec<_> = fixed_expenses.iter().map(|e| e.pocket_id).collect();
        pocket_ids.sort();
        pocket_ids.dedup();
        let mut pockets = Vec::with_capacity(pocket_ids.len());
        for id in pocket_ids {
            if let Some(pocket) = self.storage.pockets.get(id)? {
                pockets.push(pocket);
            }
        }

        let daily_budget = self
            .storage
            .daily_expenses
            .get_budget(month)?
            .unwrap_or_else(|| DailyBudget::new(month, Money::zero()));

        Ok(FinancialConfiguration {
            month,
            salary,
            pockets,
            fixed_expenses,
            daily_budget,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixed_expense::NewFixedExpense;
    use crate::services::{test_storage, FixedExpenseService, PocketService};

    fn jan() -> Month {
        Month::parse("2024-01").unwrap()
    }

    #[test]
    fn test_unset_salary_reads_as_zero() {
        let (_dir, storage) = test_storage();
        let salary = IncomeService::new(&storage).get_salary(jan()).unwrap();
        assert!(salary.monthly_amount.is_zero());
        assert_eq!(salary.month, jan());
    }

    #[test]
    fn test_set_salary_replaces_existing() {
        let (_dir, storage) = test_storage();
        let service = IncomeService::new(&storage);

        service.set_salary(jan(), Money::from_units(3_000_000)).unwrap();
        service.set_salary(jan(), Money::from_units(3_200_000)).unwrap();

        assert_eq!(
            service.get_salary(jan()).unwrap().monthly_amount,
            Money::from_units(3_200_000)
        );
        assert_eq!(service.list_salaries().unwrap().len(), 1);
        assert_eq!(storage.audit().read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_negative_salary_rejected() {
        let (_dir, storage) = test_storage();
        let err = IncomeService::new(&storage)
            .set_salary(jan(), Money::from_units(-1))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_financial_configuration() {
        let (_dir, storage) = test_storage();
        let pockets = PocketService::new(&storage);
        let housing = pockets.create("Housing", None).unwrap();
        pockets.create("Unused", None).unwrap();

        let fixed = FixedExpenseService::new(&storage);
        for concept in ["Rent", "Power"] {
            fixed
                .create(NewFixedExpense::fixed(
                    housing.id,
                    concept,
                    Money::from_units(100),
                    5,
                    jan(),
                ))
                .unwrap();
        }

        let service = IncomeService::new(&storage);
        service.set_salary(jan(), Money::from_units(1000)).unwrap();

        let config = service.financial_configuration(jan()).unwrap();
        assert_eq!(config.salary.monthly_amount, Money::from_units(1000));
        assert_eq!(config.fixed_expenses.len(), 2);
        assert_eq!(config.pockets.len(), 1);
        assert_eq!(config.pockets[0].name, "Housing");
        assert!(config.daily_budget.monthly_budget.is_zero());
    }
}
