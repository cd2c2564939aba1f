//! Fixed expense service
//!
//! CRUD and payment tracking for monthly obligations, plus the pure helpers
//! used to present them: status sort, grouping by pocket, filtering and
//! totals.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    ExpenseKind, FixedExpense, FixedExpenseId, Money, Month, PaymentStatus, Pocket, PocketId,
    StatusFilter,
};
use crate::storage::Storage;

/// Input for creating a fixed expense
#[derive(Debug, Clone)]
pub struct NewFixedExpense {
    pub pocket_id: PocketId,
    pub concept_name: String,
    pub kind: ExpenseKind,
    pub amount: Money,
    pub payment_day: u32,
    pub budget_limit: Option<Money>,
    pub month: Month,
}

impl NewFixedExpense {
    pub fn fixed(
        pocket_id: PocketId,
        concept_name: impl Into<String>,
        amount: Money,
        payment_day: u32,
        month: Month,
    ) -> Self {
        Self {
            pocket_id,
            concept_name: concept_name.into(),
            kind: ExpenseKind::Fixed,
            amount,
            payment_day,
            budget_limit: None,
            month,
        }
    }

    pub fn hybrid(
        pocket_id: PocketId,
        concept_name: impl Into<String>,
        budget_limit: Money,
        month: Month,
    ) -> Self {
        Self {
            pocket_id,
            concept_name: concept_name.into(),
            kind: ExpenseKind::Hybrid,
            amount: Money::zero(),
            payment_day: 1,
            budget_limit: Some(budget_limit),
            month,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixedExpenseUpdate {
    pub pocket_id: Option<PocketId>,
    pub concept_name: Option<String>,
    pub kind: Option<ExpenseKind>,
    pub amount: Option<Money>,
    pub payment_day: Option<u32>,
    pub budget_limit: Option<Money>,
    pub month: Option<Month>,
}

/// Fixed expenses of one pocket, in status order
#[derive(Debug, Clone)]
pub struct PocketGroup {
    pub pocket_id: PocketId,
    pub pocket_name: String,
    pub expenses: Vec<FixedExpense>,
    pub total: Money,
    pub paid_count: usize,
}

/// Aggregate figures for a list of fixed expenses
#[derive(Debug, Clone, PartialEq)]
pub struct FixedExpenseTotals {
    pub count: usize,
    pub paid_count: usize,
    pub total: Money,
    pub paid_total: Money,
    pub outstanding: Money,
    /// `amount` of the unpaid expenses; hybrids carry an amount of 0
    pub unpaid_amount: Money,
    /// Share of expenses (by count) already paid; 0 for an empty list
    pub paid_percentage: f64,
}

/// Overdue first, then due, then paid; larger amounts first within a status
///
/// Hybrids rank by their budget limit rather than their zero `amount`, so a
/// large hybrid budget sits among the large fixed payments of its status.
pub fn sort_by_status_and_amount(expenses: &mut [FixedExpense], today: NaiveDate) {
    expenses.sort_by(|a, b| {
        a.status_on(today)
            .cmp(&b.status_on(today))
            .then_with(|| b.planned_amount().cmp(&a.planned_amount()))
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub fn filter_by_status(expenses: Vec<FixedExpense>, filter: StatusFilter) -> Vec<FixedExpense> {
    expenses.into_iter().filter(|e| filter.matches(e)).collect()
}

/// Fallback label for a pocket id with no pocket record
pub fn pocket_label(pocket_id: PocketId) -> String {
    format!("Pocket {}", pocket_id.value())
}

/// Group expenses by pocket, sorted by pocket name. Each group is sorted by
/// status and amount.
pub fn group_by_pocket(
    expenses: Vec<FixedExpense>,
    pockets: &[Pocket],
    today: NaiveDate,
) -> Vec<PocketGroup> {
    let names: HashMap<PocketId, &str> = pockets.iter().map(|p| (p.id, p.name.as_str())).collect();

    let mut by_pocket: HashMap<PocketId, Vec<FixedExpense>> = HashMap::new();
    for expense in expenses {
        by_pocket.entry(expense.pocket_id).or_default().push(expense);
    }

    let mut groups: Vec<PocketGroup> = by_pocket
        .into_iter()
        .map(|(pocket_id, mut expenses)| {
            sort_by_status_and_amount(&mut expenses, today);
            let totals = totals(&expenses);
            PocketGroup {
                pocket_id,
                pocket_name: names
                    .get(&pocket_id)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| pocket_label(pocket_id)),
                expenses,
                total: totals.total,
                paid_count: totals.paid_count,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        a.pocket_name
            .to_lowercase()
            .cmp(&b.pocket_name.to_lowercase())
            .then(a.pocket_id.cmp(&b.pocket_id))
    });
    groups
}

pub fn totals(expenses: &[FixedExpense]) -> FixedExpenseTotals {
    let count = expenses.len();
    let paid: Vec<_> = expenses.iter().filter(|e| e.is_paid).collect();
    let paid_count = paid.len();
    let paid_percentage = if count == 0 {
        0.0
    } else {
        paid_count as f64 / count as f64 * 100.0
    };

    FixedExpenseTotals {
        count,
        paid_count,
        total: expenses.iter().map(|e| e.planned_amount()).sum(),
        paid_total: paid.iter().map(|e| e.planned_amount()).sum(),
        outstanding: expenses.iter().map(|e| e.outstanding()).sum(),
        unpaid_amount: expenses.iter().filter(|e| !e.is_paid).map(|e| e.amount).sum(),
        paid_percentage,
    }
}

/// Count of expenses per status as of `today`
pub fn status_counts(expenses: &[FixedExpense], today: NaiveDate) -> HashMap<PaymentStatus, usize> {
    let mut counts = HashMap::new();
    for expense in expenses {
        *counts.entry(expense.status_on(today)).or_insert(0) += 1;
    }
    counts
}

pub struct FixedExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> FixedExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn list_by_month(&self, month: Month, filter: StatusFilter) -> FintrackResult<Vec<FixedExpense>> {
        let expenses = self.storage.fixed_expenses.get_by_month(month)?;
        Ok(filter_by_status(expenses, filter))
    }

    pub fn get(&self, id: FixedExpenseId) -> FintrackResult<Option<FixedExpense>> {
        self.storage.fixed_expenses.get(id)
    }

    pub fn get_required(&self, id: FixedExpenseId) -> FintrackResult<FixedExpense> {
        self.get(id)?
            .ok_or_else(|| FintrackError::fixed_expense_not_found(id.to_string()))
    }

    /// The month's expenses grouped by pocket
    pub fn board(&self, month: Month, filter: StatusFilter, today: NaiveDate) -> FintrackResult<Vec<PocketGroup>> {
        let expenses = self.list_by_month(month, filter)?;
        let pockets = self.storage.pockets.get_all()?;
        Ok(group_by_pocket(expenses, &pockets, today))
    }

    pub fn create(&self, input: NewFixedExpense) -> FintrackResult<FixedExpense> {
        self.require_pocket(input.pocket_id)?;

        let id = self.storage.fixed_expenses.next_id()?;
        let mut expense = match input.kind {
            ExpenseKind::Fixed => FixedExpense::new_fixed(
                id,
                input.pocket_id,
                input.concept_name.trim(),
                input.amount,
                input.payment_day,
                input.month,
            ),
            ExpenseKind::Hybrid => FixedExpense::new_hybrid(
                id,
                input.pocket_id,
                input.concept_name.trim(),
                input.budget_limit.unwrap_or_default(),
                input.month,
            ),
        };
        expense.normalize();
        expense
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.fixed_expenses.upsert(expense.clone())?;
        self.storage.fixed_expenses.save()?;

        self.storage.log_create(
            EntityType::FixedExpense,
            expense.id.to_string(),
            Some(expense.concept_name.clone()),
            &expense,
        )?;
        tracing::debug!(id = %expense.id, kind = %expense.kind, month = %expense.month, "fixed expense created");

        Ok(expense)
    }

    pub fn update(&self, id: FixedExpenseId, changes: FixedExpenseUpdate) -> FintrackResult<FixedExpense> {
        let mut expense = self.get_required(id)?;
        let before = expense.clone();

        if let Some(pocket_id) = changes.pocket_id {
            self.require_pocket(pocket_id)?;
            expense.pocket_id = pocket_id;
        }
        if let Some(name) = changes.concept_name {
            expense.concept_name = name.trim().to_string();
        }
        if let Some(kind) = changes.kind {
            if kind == ExpenseKind::Fixed && !expense.transactions.is_empty() {
                return Err(FintrackError::Validation(
                    "Cannot turn a hybrid expense with transactions into a fixed one".into(),
                ));
            }
            expense.kind = kind;
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(day) = changes.payment_day {
            expense.payment_day = day;
        }
        if let Some(limit) = changes.budget_limit {
            expense.budget_limit = Some(limit);
        }
        if let Some(month) = changes.month {
            expense.month = month;
        }

        expense.normalize();
        expense.touch();
        expense
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.save_update(&before, &expense)?;
        Ok(expense)
    }

    /// Flip the paid flag. Paying stamps `today` as the paid date; unpaying
    /// clears it.
    pub fn toggle_paid(&self, id: FixedExpenseId, today: NaiveDate) -> FintrackResult<FixedExpense> {
        let expense = self.get_required(id)?;
        self.set_paid(id, !expense.is_paid, today)
    }

    pub fn set_paid(&self, id: FixedExpenseId, paid: bool, today: NaiveDate) -> FintrackResult<FixedExpense> {
        let mut expense = self.get_required(id)?;
        let before = expense.clone();
        expense.set_paid(paid, today);

        self.save_update(&before, &expense)?;
        Ok(expense)
    }

    pub fn delete(&self, id: FixedExpenseId) -> FintrackResult<FixedExpense> {
        let expense = self
            .storage
            .fixed_expenses
            .delete(id)?
            .ok_or_else(|| FintrackError::fixed_expense_not_found(id.to_string()))?;
        self.storage.fixed_expenses.save()?;

        self.storage.log_delete(
            EntityType::FixedExpense,
            expense.id.to_string(),
            Some(expense.concept_name.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Copy every fixed expense of `from` into `to` as unpaid, skipping any
    /// concept already present in the same pocket of the target month.
    /// Returns the expenses created.
    pub fn copy_month(&self, from: Month, to: Month) -> FintrackResult<Vec<FixedExpense>> {
        if from == to {
            return Err(FintrackError::Validation(
                "Source and target month are the same".into(),
            ));
        }

        let existing = self.storage.fixed_expenses.get_by_month(to)?;
        let already_there = |source: &FixedExpense| {
            existing.iter().any(|e| {
                e.pocket_id == source.pocket_id
                    && e.concept_name.to_lowercase() == source.concept_name.to_lowercase()
            })
        };

        let mut created = Vec::new();
        for source in self.storage.fixed_expenses.get_by_month(from)? {
            if already_there(&source) {
                tracing::debug!(concept = %source.concept_name, "already in target month, skipping");
                continue;
            }
            let id = self.storage.fixed_expenses.next_id()?;
            let copy = source.carried_into(id, to);
            self.storage.fixed_expenses.upsert(copy.clone())?;
            created.push(copy);
        }
        self.storage.fixed_expenses.save()?;

        for expense in &created {
            self.storage.log_create(
                EntityType::FixedExpense,
                expense.id.to_string(),
                Some(expense.concept_name.clone()),
                expense,
            )?;
        }
        tracing::info!(from = %from, to = %to, copied = created.len(), "copied fixed expenses");

        Ok(created)
    }

    fn save_update(&self, before: &FixedExpense, after: &FixedExpense) -> FintrackResult<()> {
        self.storage.fixed_expenses.upsert(after.clone())?;
        self.storage.fixed_expenses.save()?;

        self.storage.log_update(
            EntityType::FixedExpense,
            after.id.to_string(),
            Some(after.concept_name.clone()),
            before,
            after,
        )
    }

    fn require_pocket(&self, pocket_id: PocketId) -> FintrackResult<()> {
        if self.storage.pockets.get(pocket_id)?.is_none() {
            return Err(FintrackError::pocket_not_found(pocket_id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{test_storage, PocketService};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn jan() -> Month {
        Month::parse("2024-01").unwrap()
    }

    fn fixed(id: u64, pocket: u64, amount: i64, day: u32) -> FixedExpense {
        FixedExpense::new_fixed(
            FixedExpenseId::new(id),
            PocketId::new(pocket),
            format!("Concept {}", id),
            Money::from_units(amount),
            day,
            jan(),
        )
    }

    #[test]
    fn test_sort_overdue_due_paid_then_amount() {
        let today = date(2024, 1, 15);
        let mut paid_big = fixed(1, 1, 900, 1);
        paid_big.set_paid(true, date(2024, 1, 1));
        let due_small = fixed(2, 1, 100, 20);
        let due_big = fixed(3, 1, 500, 25);
        let overdue = fixed(4, 1, 50, 10);

        let mut list = vec![paid_big, due_small, due_big, overdue];
        sort_by_status_and_amount(&mut list, today);

        let ids: Vec<u64> = list.iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_group_by_pocket_with_fallback_name() {
        let pockets = vec![Pocket::new(PocketId::new(1), "Housing")];
        let expenses = vec![fixed(1, 1, 100, 5), fixed(2, 7, 50, 5), fixed(3, 1, 300, 5)];

        let groups = group_by_pocket(expenses, &pockets, date(2024, 1, 1));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].pocket_name, "Housing");
        assert_eq!(groups[0].total, Money::from_units(400));
        assert_eq!(groups[0].expenses[0].id.value(), 3);
        assert_eq!(groups[1].pocket_name, "Pocket 7");
    }

    #[test]
    fn test_filter() {
        let mut paid = fixed(1, 1, 100, 5);
        paid.set_paid(true, date(2024, 1, 2));
        let list = vec![paid, fixed(2, 1, 100, 5)];

        assert_eq!(filter_by_status(list.clone(), StatusFilter::All).len(), 2);
        assert_eq!(filter_by_status(list.clone(), StatusFilter::Paid)[0].id.value(), 1);
        assert_eq!(filter_by_status(list, StatusFilter::Pending)[0].id.value(), 2);
    }

    #[test]
    fn test_totals() {
        assert_eq!(totals(&[]).paid_percentage, 0.0);

        let mut paid = fixed(1, 1, 300, 5);
        paid.set_paid(true, date(2024, 1, 2));
        let list = vec![paid, fixed(2, 1, 100, 5), fixed(3, 1, 100, 5), fixed(4, 1, 100, 5)];
        let t = totals(&list);
        assert_eq!(t.count, 4);
        assert_eq!(t.paid_count, 1);
        assert_eq!(t.total, Money::from_units(600));
        assert_eq!(t.paid_total, Money::from_units(300));
        assert_eq!(t.outstanding, Money::from_units(300));
        assert_eq!(t.unpaid_amount, Money::from_units(300));
        assert_eq!(t.paid_percentage, 25.0);
    }

    #[test]
    fn test_status_counts() {
        let mut paid = fixed(1, 1, 300, 5);
        paid.set_paid(true, date(2024, 1, 2));
        let list = vec![paid, fixed(2, 1, 100, 5), fixed(3, 1, 100, 30)];
        let counts = status_counts(&list, date(2024, 1, 10));
        assert_eq!(counts.get(&PaymentStatus::Paid), Some(&1));
        assert_eq!(counts.get(&PaymentStatus::Overdue), Some(&1));
        assert_eq!(counts.get(&PaymentStatus::Due), Some(&1));
    }

    #[test]
    fn test_create_validates_per_kind() {
        let (_dir, storage) = test_storage();
        let pocket = PocketService::new(&storage).create("Housing", None).unwrap();
        let service = FixedExpenseService::new(&storage);

        let err = service
            .create(NewFixedExpense::fixed(pocket.id, "Rent", Money::zero(), 5, jan()))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create(NewFixedExpense::fixed(pocket.id, "Rent", Money::from_units(1), 32, jan()))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create(NewFixedExpense::hybrid(pocket.id, "Market", Money::zero(), jan()))
            .unwrap_err();
        assert!(err.is_validation());

        let mut input = NewFixedExpense::hybrid(pocket.id, "Market", Money::from_units(800), jan());
        input.amount = Money::from_units(55);
        input.payment_day = 20;
        let hybrid = service.create(input).unwrap();
        assert!(hybrid.amount.is_zero());
        assert_eq!(hybrid.payment_day, 1);
    }

    #[test]
    fn test_create_requires_pocket() {
        let (_dir, storage) = test_storage();
        let err = FixedExpenseService::new(&storage)
            .create(NewFixedExpense::fixed(
                PocketId::new(5),
                "Rent",
                Money::from_units(1),
                1,
                jan(),
            ))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_toggle_paid() {
        let (_dir, storage) = test_storage();
        let pocket = PocketService::new(&storage).create("Housing", None).unwrap();
        let service = FixedExpenseService::new(&storage);
        let rent = service
            .create(NewFixedExpense::fixed(pocket.id, "Rent", Money::from_units(1000), 5, jan()))
            .unwrap();

        let paid = service.toggle_paid(rent.id, date(2024, 1, 4)).unwrap();
        assert!(paid.is_paid);
        assert_eq!(paid.paid_date, Some(date(2024, 1, 4)));

        let unpaid = service.toggle_paid(rent.id, date(2024, 1, 6)).unwrap();
        assert!(!unpaid.is_paid);
        assert!(unpaid.paid_date.is_none());
        assert_eq!(unpaid.status_on(date(2024, 1, 6)), PaymentStatus::Overdue);
    }

    #[test]
    fn test_update_switches_kind() {
        let (_dir, storage) = test_storage();
        let pocket = PocketService::new(&storage).create("Food", None).unwrap();
        let service = FixedExpenseService::new(&storage);
        let expense = service
            .create(NewFixedExpense::fixed(pocket.id, "Market", Money::from_units(400), 10, jan()))
            .unwrap();

        let hybrid = service
            .update(
                expense.id,
                FixedExpenseUpdate {
                    kind: Some(ExpenseKind::Hybrid),
                    budget_limit: Some(Money::from_units(600)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(hybrid.is_hybrid());
        assert!(hybrid.amount.is_zero());
        assert_eq!(hybrid.budget_limit(), Money::from_units(600));
    }

    #[test]
    fn test_copy_month() {
        let (_dir, storage) = test_storage();
        let pocket = PocketService::new(&storage).create("Housing", None).unwrap();
        let service = FixedExpenseService::new(&storage);

        let rent = service
            .create(NewFixedExpense::fixed(pocket.id, "Rent", Money::from_units(1000), 5, jan()))
            .unwrap();
        service.toggle_paid(rent.id, date(2024, 1, 5)).unwrap();
        service
            .create(NewFixedExpense::hybrid(pocket.id, "Market", Money::from_units(500), jan()))
            .unwrap();
        // Already present in February, must not be duplicated
        service
            .create(NewFixedExpense::fixed(
                pocket.id,
                "rent",
                Money::from_units(1100),
                5,
                jan().next(),
            ))
            .unwrap();

        let created = service.copy_month(jan(), jan().next()).unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].concept_name, "Market");
        assert!(!created[0].is_paid);

        let feb = service.list_by_month(jan().next(), StatusFilter::All).unwrap();
        assert_eq!(feb.len(), 2);

        assert!(service.copy_month(jan(), jan()).unwrap_err().is_validation());
    }

    #[test]
    fn test_delete() {
        let (_dir, storage) = test_storage();
        let pocket = PocketService::new(&storage).create("Housing", None).unwrap();
        let service = FixedExpenseService::new(&storage);
        let rent = service
            .create(NewFixedExpense::fixed(pocket.id, "Rent", Money::from_units(1000), 5, jan()))
            .unwrap();

        service.delete(rent.id).unwrap();
        assert!(service.get(rent.id).unwrap().is_none());
        assert!(service.delete(rent.id).unwrap_err().is_not_found());
    }
}
