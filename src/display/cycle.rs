//! Cycle and expense display formatting

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Cycle, Expense, PaymentTypeId, PocketId};

#[derive(Tabled)]
struct CycleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Pocket")]
    pocket: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format cycles as a table; `pocket_names` resolves the pocket column
pub fn format_cycle_list(
    cycles: &[Cycle],
    pocket_names: &HashMap<PocketId, String>,
    currency: &str,
) -> String {
    if cycles.is_empty() {
        return "No cycles found.".to_string();
    }

    let rows: Vec<CycleRow> = cycles
        .iter()
        .map(|c| CycleRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            pocket: pocket_names
                .get(&c.pocket_id)
                .cloned()
                .unwrap_or_else(|| c.pocket_id.to_string()),
            budget: c.budget.format_with_symbol(currency),
            from: c.date_init.to_string(),
            to: c.date_end.to_string(),
            status: if c.active { "active" } else { "closed" },
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Expense")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Cycle")]
    cycle: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Created")]
    created: String,
}

pub fn format_expense_list(
    expenses: &[Expense],
    payment_names: &HashMap<PaymentTypeId, String>,
    currency: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            name: e.name.clone(),
            value: e.value.format_with_symbol(currency),
            cycle: e.cycle_id.to_string(),
            payment: payment_names
                .get(&e.payment_type_id)
                .cloned()
                .unwrap_or_else(|| e.payment_type_id.to_string()),
            created: e.created_at.date_naive().to_string(),
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CycleId, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_cycle_table_resolves_pocket_names() {
        let cycle = Cycle::new(
            CycleId::new(1),
            PocketId::new(2),
            "March",
            Money::from_units(500),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let names = HashMap::from([(PocketId::new(2), "Food".to_string())]);

        let output = format_cycle_list(&[cycle], &names, "$");
        assert!(output.contains("Food"));
        assert!(output.contains("2024-03-31"));
        assert!(output.contains("$500.00"));
    }

    #[test]
    fn test_empty_expenses() {
        assert_eq!(
            format_expense_list(&[], &HashMap::new(), "$"),
            "No expenses found."
        );
    }
}
