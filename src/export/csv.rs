//! CSV Export functionality
//!
//! Exports daily and fixed expenses to CSV (spreadsheet-compatible).

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Month};
use crate::services::fixed_expense::pocket_label;
use crate::storage::Storage;

fn decimal(amount: Money) -> String {
    format!("{:.2}", amount.cents() as f64 / 100.0)
}

fn csv_error(e: impl std::fmt::Display) -> FintrackError {
    FintrackError::Export(e.to_string())
}

#[derive(Serialize)]
struct DailyRecord {
    id: String,
    date: String,
    month: String,
    description: String,
    amount: String,
}

/// Export daily expenses, optionally limited to one month, oldest first
pub fn export_daily_expenses_csv<W: Write>(
    storage: &Storage,
    month: Option<Month>,
    writer: W,
) -> FintrackResult<()> {
    let mut expenses = match month {
        Some(month) => storage.daily_expenses.get_by_month(month)?,
        None => storage.daily_expenses.get_all()?,
    };
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let mut out = csv::Writer::from_writer(writer);
    for expense in &expenses {
        out.serialize(DailyRecord {
            id: expense.id.to_string(),
            date: expense.date.to_string(),
            month: expense.month().to_string(),
            description: expense.description.clone(),
            amount: decimal(expense.amount),
        })
        .map_err(csv_error)?;
    }
    out.flush().map_err(csv_error)?;

    Ok(())
}

#[derive(Serialize)]
struct FixedRecord {
    id: String,
    month: String,
    pocket: String,
    concept: String,
    kind: String,
    amount: String,
    budget_limit: String,
    spent: String,
    payment_day: u32,
    paid: bool,
    paid_date: String,
}

/// Export fixed expenses (both kinds), optionally limited to one month
pub fn export_fixed_expenses_csv<W: Write>(
    storage: &Storage,
    month: Option<Month>,
    writer: W,
) -> FintrackResult<()> {
    let pocket_names: HashMap<_, _> = storage
        .pockets
        .get_all()?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    let mut expenses = match month {
        Some(month) => storage.fixed_expenses.get_by_month(month)?,
        None => storage.fixed_expenses.get_all()?,
    };
    expenses.sort_by(|a, b| a.month.cmp(&b.month).then(a.id.cmp(&b.id)));

    let mut out = csv::Writer::from_writer(writer);
    for expense in &expenses {
        let hybrid = expense.is_hybrid();
        out.serialize(FixedRecord {
            id: expense.id.to_string(),
            month: expense.month.to_string(),
            pocket: pocket_names
                .get(&expense.pocket_id)
                .cloned()
                .unwrap_or_else(|| pocket_label(expense.pocket_id)),
            concept: expense.concept_name.clone(),
            kind: expense.kind.to_string(),
            amount: decimal(expense.amount),
            budget_limit: if hybrid {
                decimal(expense.budget_limit())
            } else {
                String::new()
            },
            spent: if hybrid {
                decimal(expense.current_spent())
            } else {
                String::new()
            },
            payment_day: expense.payment_day,
            paid: expense.is_paid,
            paid_date: expense.paid_date.map(|d| d.to_string()).unwrap_or_default(),
        })
        .map_err(csv_error)?;
    }
    out.flush().map_err(csv_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixed_expense::NewFixedExpense;
    use crate::services::{
        test_storage, DailyExpenseService, FixedExpenseService, HybridTransactionService,
        PocketService,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_daily_csv_quotes_descriptions() {
        let (_dir, storage) = test_storage();
        let daily = DailyExpenseService::new(&storage);
        daily
            .add(
                "Lunch, with team",
                Money::from_cents(12_550),
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            )
            .unwrap();
        daily
            .add(
                "Coffee",
                Money::from_units(4),
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            )
            .unwrap();

        let mut buffer = Vec::new();
        export_daily_expenses_csv(&storage, Month::parse("2024-05").ok(), &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "id,date,month,description,amount");
        assert_eq!(lines[1], "day-1,2024-05-02,2024-05,\"Lunch, with team\",125.50");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_fixed_csv() {
        let (_dir, storage) = test_storage();
        let pocket = PocketService::new(&storage).create("Food", None).unwrap();
        let month = Month::parse("2024-05").unwrap();
        let groceries = FixedExpenseService::new(&storage)
            .create(NewFixedExpense::hybrid(pocket.id, "Groceries", Money::from_units(500), month))
            .unwrap();
        HybridTransactionService::new(&storage)
            .add(
                groceries.id,
                Money::from_units(120),
                "market",
                NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            )
            .unwrap();

        let mut buffer = Vec::new();
        export_fixed_expenses_csv(&storage, None, &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with(
            "id,month,pocket,concept,kind,amount,budget_limit,spent,payment_day,paid,paid_date\n"
        ));
        assert!(csv.contains("fix-1,2024-05,Food,Groceries,hybrid,0.00,500.00,120.00,1,false,"));
    }
}
