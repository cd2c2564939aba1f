//! Expense service
//!
//! Expenses are recorded against a cycle; the pocket is always taken from
//! that cycle.

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Cycle, CycleId, Expense, ExpenseId, Money, PaymentTypeId};
use crate::storage::Storage;

#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub name: Option<String>,
    pub value: Option<Money>,
    pub cycle_id: Option<CycleId>,
    pub payment_type_id: Option<PaymentTypeId>,
}

pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All expenses, newest first
    pub fn list(&self) -> FintrackResult<Vec<Expense>> {
        self.storage.expenses.get_newest_first()
    }

    pub fn list_by_cycle(&self, cycle_id: CycleId) -> FintrackResult<Vec<Expense>> {
        self.storage.expenses.get_by_cycle(cycle_id)
    }

    pub fn get(&self, id: ExpenseId) -> FintrackResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    pub fn create(
        &self,
        name: &str,
        value: Money,
        cycle_id: CycleId,
        payment_type_id: PaymentTypeId,
    ) -> FintrackResult<Expense> {
        let cycle = self.require_cycle(cycle_id)?;
        self.require_payment_type(payment_type_id)?;

        let id = self.storage.expenses.next_id()?;
        let expense = Expense::new(id, name.trim(), value, cycle.id, cycle.pocket_id, payment_type_id);
        expense
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    pub fn update(&self, id: ExpenseId, changes: ExpenseUpdate) -> FintrackResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| FintrackError::expense_not_found(id.to_string()))?;
        let before = expense.clone();

        if let Some(name) = changes.name {
            expense.name = name.trim().to_string();
        }
        if let Some(value) = changes.value {
            expense.value = value;
        }
        if let Some(cycle_id) = changes.cycle_id {
            let cycle = self.require_cycle(cycle_id)?;
            expense.cycle_id = cycle.id;
            expense.pocket_id = cycle.pocket_id;
        }
        if let Some(payment_type_id) = changes.payment_type_id {
            self.require_payment_type(payment_type_id)?;
            expense.payment_type_id = payment_type_id;
        }
        expense.updated_at = chrono::Utc::now();

        expense
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    pub fn delete(&self, id: ExpenseId) -> FintrackResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| FintrackError::expense_not_found(id.to_string()))?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    fn require_cycle(&self, id: CycleId) -> FintrackResult<Cycle> {
        self.storage
            .cycles
            .get(id)?
            .ok_or_else(|| FintrackError::cycle_not_found(id.to_string()))
    }

    fn require_payment_type(&self, id: PaymentTypeId) -> FintrackResult<()> {
        match self.storage.payment_types.get(id)? {
            Some(pt) if pt.active => Ok(()),
            Some(pt) => Err(FintrackError::Validation(format!(
                "Payment type '{}' is inactive",
                pt.name
            ))),
            None => Err(FintrackError::payment_type_not_found(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cycle::NewCycle;
    use crate::services::{test_storage, CycleService, PaymentTypeService, PocketService};
    use chrono::NaiveDate;

    struct Fixture {
        cycle: Cycle,
        payment_type: PaymentTypeId,
    }

    fn setup(storage: &Storage) -> Fixture {
        let pocket = PocketService::new(storage).create("Food", None).unwrap();
        let cycle = CycleService::new(storage)
            .create(NewCycle {
                pocket_id: pocket.id,
                name: "January".into(),
                budget: Some(Money::from_units(600_000)),
                date_init: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                date_end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            })
            .unwrap();
        let payment_type = PaymentTypeService::new(storage).create("Cash").unwrap().id;
        Fixture {
            cycle,
            payment_type,
        }
    }

    #[test]
    fn test_pocket_comes_from_cycle() {
        let (_dir, storage) = test_storage();
        let fx = setup(&storage);
        let expense = ExpenseService::new(&storage)
            .create("Market", Money::from_units(85_000), fx.cycle.id, fx.payment_type)
            .unwrap();
        assert_eq!(expense.pocket_id, fx.cycle.pocket_id);
    }

    #[test]
    fn test_references_must_exist() {
        let (_dir, storage) = test_storage();
        let fx = setup(&storage);
        let service = ExpenseService::new(&storage);

        let err = service
            .create("Market", Money::from_units(1), CycleId::new(99), fx.payment_type)
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service
            .create("Market", Money::from_units(1), fx.cycle.id, PaymentTypeId::new(99))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_value_must_be_positive() {
        let (_dir, storage) = test_storage();
        let fx = setup(&storage);
        let err = ExpenseService::new(&storage)
            .create("Market", Money::zero(), fx.cycle.id, fx.payment_type)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_list_by_cycle_and_update() {
        let (_dir, storage) = test_storage();
        let fx = setup(&storage);
        let service = ExpenseService::new(&storage);

        let first = service
            .create("Market", Money::from_units(100), fx.cycle.id, fx.payment_type)
            .unwrap();
        service
            .create("Bakery", Money::from_units(20), fx.cycle.id, fx.payment_type)
            .unwrap();

        let listed = service.list_by_cycle(fx.cycle.id).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Bakery");

        let updated = service
            .update(
                first.id,
                ExpenseUpdate {
                    value: Some(Money::from_units(120)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.value, Money::from_units(120));

        service.delete(first.id).unwrap();
        assert_eq!(service.list().unwrap().len(), 1);
    }
}
