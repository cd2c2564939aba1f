//! Fixed expense display formatting
//!
//! The month board groups expenses per pocket; hybrid expenses show their
//! budget usage instead of a fixed amount.

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_relative_date, level_label, progress_bar, status_label};
use crate::models::{FixedExpense, HybridTransaction, ProgressThresholds};
use crate::services::fixed_expense::{FixedExpenseTotals, PocketGroup};

#[derive(Tabled)]
struct FixedRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Concept")]
    concept: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Budget use")]
    usage: String,
}

fn fixed_row(
    expense: &FixedExpense,
    today: NaiveDate,
    thresholds: &ProgressThresholds,
    currency: &str,
) -> FixedRow {
    let (amount, usage) = if expense.is_hybrid() {
        let pct = expense.usage_percentage();
        (
            format!(
                "{} / {}",
                expense.current_spent().format_with_symbol(currency),
                expense.budget_limit().format_with_symbol(currency)
            ),
            format!(
                "{} {:.0}% {}",
                progress_bar(pct, 10),
                pct,
                level_label(thresholds.level(pct))
            )
            .trim_end()
            .to_string(),
        )
    } else {
        (expense.amount.format_with_symbol(currency), String::new())
    };

    FixedRow {
        id: expense.id.to_string(),
        concept: expense.concept_name.clone(),
        amount,
        due: expense.due_date().to_string(),
        status: status_label(expense.status_on(today)),
        usage,
    }
}

/// Format the month board: one table per pocket plus the month totals
pub fn format_fixed_board(
    groups: &[PocketGroup],
    totals: &FixedExpenseTotals,
    today: NaiveDate,
    thresholds: &ProgressThresholds,
    currency: &str,
) -> String {
    if groups.is_empty() {
        return "No fixed expenses for this month.".to_string();
    }

    let mut output = String::new();
    for group in groups {
        output.push_str(&format!(
            "{} ({} of {} paid, {})\n",
            group.pocket_name,
            group.paid_count,
            group.expenses.len(),
            group.total.format_with_symbol(currency)
        ));
        let rows: Vec<FixedRow> = group
            .expenses
            .iter()
            .map(|e| fixed_row(e, today, thresholds, currency))
            .collect();
        output.push_str(&Table::new(rows).with(Style::psql()).to_string());
        output.push_str("\n\n");
    }

    output.push_str(&format!(
        "Total: {}  Paid: {}/{} ({:.1}%)  Outstanding: {}\n",
        totals.total.format_with_symbol(currency),
        totals.paid_count,
        totals.count,
        totals.paid_percentage,
        totals.outstanding.format_with_symbol(currency)
    ));

    output
}

/// Format a single fixed expense's details
pub fn format_fixed_details(
    expense: &FixedExpense,
    pocket_name: &str,
    today: NaiveDate,
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Fixed expense: {}\n", expense.concept_name));
    output.push_str(&format!("  ID:       {}\n", expense.id));
    output.push_str(&format!("  Pocket:   {}\n", pocket_name));
    output.push_str(&format!("  Month:    {}\n", expense.month.name()));
    output.push_str(&format!("  Kind:     {}\n", expense.kind));
    output.push_str(&format!(
        "  Status:   {}\n",
        status_label(expense.status_on(today))
    ));

    if expense.is_hybrid() {
        output.push_str(&format!(
            "  Budget:   {}\n",
            expense.budget_limit().format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "  Spent:    {} ({:.1}%)\n",
            expense.current_spent().format_with_symbol(currency),
            expense.usage_percentage()
        ));
        output.push_str(&format!(
            "  Remaining: {}\n",
            expense.remaining().format_with_symbol(currency)
        ));
        if expense.is_exceeded() {
            output.push_str("  Budget exceeded\n");
        }
    } else {
        output.push_str(&format!(
            "  Amount:   {}\n",
            expense.amount.format_with_symbol(currency)
        ));
        output.push_str(&format!("  Due:      {}\n", expense.due_date()));
    }

    if let Some(paid) = expense.paid_date {
        output.push_str(&format!("  Paid on:  {}\n", paid));
    }

    output
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

pub fn format_transaction_list(
    transactions: &[HybridTransaction],
    today: NaiveDate,
    currency: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions recorded.".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| TransactionRow {
            id: t.id.to_string(),
            date: format_relative_date(t.transaction_date, today),
            description: t.description.clone(),
            amount: t.amount.format_with_symbol(currency),
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedExpenseId, Money, Month, PocketId};
    use crate::services::fixed_expense::{group_by_pocket, totals};

    fn jan() -> Month {
        Month::parse("2024-01").unwrap()
    }

    #[test]
    fn test_board_shows_status_and_totals() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let rent = FixedExpense::new_fixed(
            FixedExpenseId::new(1),
            PocketId::new(7),
            "Rent",
            Money::from_units(1000),
            5,
            jan(),
        );
        let expenses = vec![rent];
        let totals = totals(&expenses);
        let groups = group_by_pocket(expenses, &[], today);

        let output = format_fixed_board(&groups, &totals, today, &ProgressThresholds::hybrid(), "$");
        assert!(output.contains("Pocket 7"));
        assert!(output.contains("OVERDUE"));
        assert!(output.contains("Outstanding: $1,000.00"));
    }

    #[test]
    fn test_hybrid_details() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut groceries = FixedExpense::new_hybrid(
            FixedExpenseId::new(2),
            PocketId::new(1),
            "Groceries",
            Money::from_units(400),
            jan(),
        );
        groceries.transactions.push(HybridTransaction::new(
            crate::models::HybridTransactionId::new(1),
            groceries.id,
            Money::from_units(100),
            "market",
            today,
        ));

        let output = format_fixed_details(&groceries, "Food", today, "$");
        assert!(output.contains("Spent:    $100.00 (25.0%)"));
        assert!(output.contains("Remaining: $300.00"));
    }

    #[test]
    fn test_transactions_use_relative_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let txn = HybridTransaction::new(
            crate::models::HybridTransactionId::new(1),
            FixedExpenseId::new(1),
            Money::from_units(5),
            "bread",
            today,
        );
        assert!(format_transaction_list(&[txn], today, "$").contains("Today"));
    }
}
