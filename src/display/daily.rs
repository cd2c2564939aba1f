//! Daily expense display formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_relative_date, level_label, progress_bar};
use crate::models::DailyExpense;
use crate::services::daily_expense::DailySummary;

#[derive(Tabled)]
struct DailyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

pub fn format_daily_list(expenses: &[DailyExpense], today: NaiveDate, currency: &str) -> String {
    if expenses.is_empty() {
        return "No daily expenses for this month.".to_string();
    }

    let rows: Vec<DailyRow> = expenses
        .iter()
        .map(|e| DailyRow {
            id: e.id.to_string(),
            when: format_relative_date(e.date, today),
            description: e.description.clone(),
            amount: e.amount.format_with_symbol(currency),
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

pub fn format_daily_summary(summary: &DailySummary, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Daily expenses: {}\n", summary.month.name()));
    output.push_str(&format!(
        "  Budget:    {}\n",
        summary.budget.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  Spent:     {} in {} expense(s)\n",
        summary.spent.format_with_symbol(currency),
        summary.expense_count
    ));
    output.push_str(&format!(
        "  Remaining: {}\n",
        summary.remaining.format_with_symbol(currency)
    ));
    output.push_str(
        format!(
            "  Progress:  {} {:.1}% {}",
            progress_bar(summary.progress, 20),
            summary.progress,
            level_label(summary.level)
        )
        .trim_end(),
    );
    output.push('\n');

    if summary.is_over_budget() {
        output.push_str("  Over budget!\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month, ProgressThresholds};

    #[test]
    fn test_summary_over_budget() {
        let month = Month::parse("2024-02").unwrap();
        let summary = DailySummary::compute(
            month,
            Money::from_units(100),
            &[DailyExpense::new(
                crate::models::DailyExpenseId::new(1),
                "Dinner",
                Money::from_units(150),
                NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            )],
            &ProgressThresholds::daily(),
        );

        let output = format_daily_summary(&summary, "$");
        assert!(output.contains("February 2024"));
        assert!(output.contains("150.0% [DANGER]"));
        assert!(output.contains("Remaining: -$50.00"));
        assert!(output.contains("Over budget!"));
    }

    #[test]
    fn test_empty_list() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        assert_eq!(
            format_daily_list(&[], today, "$"),
            "No daily expenses for this month."
        );
    }
}
