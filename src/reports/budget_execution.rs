//! Budget Execution Report
//!
//! How much of a cycle's budget has been spent.

use std::io::Write;

use serde::Serialize;

use crate::error::{FintrackError, FintrackResult};
use crate::models::progress::usage_percentage;
use crate::models::{Cycle, CycleId, Expense, Money, ProgressLevel, ProgressThresholds};
use crate::services::{CycleService, ExpenseService, PocketService};
use crate::storage::Storage;

/// Budget Execution Report for one cycle
#[derive(Debug, Clone)]
pub struct BudgetExecutionReport {
    pub cycle: Cycle,
    pub pocket_name: String,
    pub budget: Money,
    pub spent: Money,
    /// `budget - spent`; negative when overspent
    pub available: Money,
    /// Capped at 100; 0 for a zero budget
    pub usage_percentage: f64,
    pub level: ProgressLevel,
    /// Expenses of the cycle, newest first
    pub expenses: Vec<Expense>,
}

impl BudgetExecutionReport {
    pub fn generate(
        storage: &Storage,
        cycle_id: CycleId,
        thresholds: &ProgressThresholds,
    ) -> FintrackResult<Self> {
        let cycle = CycleService::new(storage).get_required(cycle_id)?;
        let expenses = ExpenseService::new(storage).list_by_cycle(cycle.id)?;
        let pocket_name = PocketService::new(storage)
            .get(cycle.pocket_id)?
            .map(|p| p.name)
            .unwrap_or_else(|| crate::services::fixed_expense::pocket_label(cycle.pocket_id));

        let spent: Money = expenses.iter().map(|e| e.value).sum();
        let usage = usage_percentage(spent, cycle.budget);

        Ok(Self {
            pocket_name,
            budget: cycle.budget,
            spent,
            available: cycle.budget - spent,
            usage_percentage: usage,
            level: thresholds.level(usage),
            expenses,
            cycle,
        })
    }

    /// Cycles that can be picked for the report
    pub fn candidates(storage: &Storage) -> FintrackResult<Vec<Cycle>> {
        let mut cycles = CycleService::new(storage).list(false)?;
        cycles.sort_by(|a, b| b.date_init.cmp(&a.date_init).then(a.id.cmp(&b.id)));
        Ok(cycles)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str(&format!(
            "Budget Execution: {} ({})\n",
            self.cycle.name, self.pocket_name
        ));
        output.push_str(&format!(
            "{} to {}\n",
            self.cycle.date_init, self.cycle.date_end
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Budget:     {:>18}\n", money(self.budget)));
        output.push_str(&format!("Spent:      {:>18}\n", money(self.spent)));
        output.push_str(&format!("Available:  {:>18}\n", money(self.available)));
        output.push_str(&format!(
            "Usage:      {:>17.1}%  {}\n",
            self.usage_percentage,
            crate::display::level_label(self.level)
        ));

        if self.expenses.is_empty() {
            output.push_str("\nNo expenses recorded for this cycle.\n");
            return output;
        }

        output.push('\n');
        output.push_str(&format!("{:<30} {:>18}  {}\n", "Expense", "Value", "Date"));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for expense in &self.expenses {
            output.push_str(&format!(
                "{:<30} {:>18}  {}\n",
                expense.name,
                money(expense.value),
                expense.created_at.date_naive()
            ));
        }

        output
    }

    /// Export the report to CSV format
    ///
    /// One row per expense followed by a TOTAL row.
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        let mut out = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        out.write_record(["Cycle", "Expense ID", "Expense", "Value", "Date"])
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        for expense in &self.expenses {
            out.serialize(ExecutionRow {
                cycle: &self.cycle.name,
                expense_id: expense.id.to_string(),
                expense: &expense.name,
                value: decimal(expense.value),
                date: expense.created_at.date_naive().to_string(),
            })
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        out.serialize(ExecutionRow {
            cycle: &self.cycle.name,
            expense_id: String::new(),
            expense: "TOTAL",
            value: decimal(self.spent),
            date: String::new(),
        })
        .map_err(|e| FintrackError::Export(e.to_string()))?;

        out.flush()
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        Ok(())
    }
}

#[derive(Serialize)]
struct ExecutionRow<'r> {
    cycle: &'r str,
    expense_id: String,
    expense: &'r str,
    value: String,
    date: String,
}

fn decimal(amount: Money) -> String {
    format!("{:.2}", amount.cents() as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cycle::{CycleUpdate, NewCycle};
    use crate::services::{test_storage, PaymentTypeService};
    use chrono::NaiveDate;

    fn setup(storage: &Storage, budget: i64) -> Cycle {
        let pocket = PocketService::new(storage).create("Transport", None).unwrap();
        CycleService::new(storage)
            .create(NewCycle {
                pocket_id: pocket.id,
                name: "March".into(),
                budget: Some(Money::from_units(budget)),
                date_init: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                date_end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            })
            .unwrap()
    }

    #[test]
    fn test_execution_figures() {
        let (_dir, storage) = test_storage();
        let cycle = setup(&storage, 1000);
        let cash = PaymentTypeService::new(&storage).create("Cash").unwrap();
        let expenses = ExpenseService::new(&storage);
        expenses
            .create("Bus pass", Money::from_units(600), cycle.id, cash.id)
            .unwrap();
        expenses
            .create("Taxi", Money::from_units(250), cycle.id, cash.id)
            .unwrap();

        let report =
            BudgetExecutionReport::generate(&storage, cycle.id, &ProgressThresholds::hybrid())
                .unwrap();
        assert_eq!(report.spent, Money::from_units(850));
        assert_eq!(report.available, Money::from_units(150));
        assert_eq!(report.usage_percentage, 85.0);
        assert_eq!(report.level, ProgressLevel::Warning);
        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.pocket_name, "Transport");
    }

    #[test]
    fn test_zero_budget_cycle() {
        let (_dir, storage) = test_storage();
        let cycle = setup(&storage, 0);
        let report =
            BudgetExecutionReport::generate(&storage, cycle.id, &ProgressThresholds::hybrid())
                .unwrap();
        assert_eq!(report.usage_percentage, 0.0);
        assert!(report.format_terminal("$").contains("No expenses recorded"));
    }

    #[test]
    fn test_candidates_are_active_cycles() {
        let (_dir, storage) = test_storage();
        let cycle = setup(&storage, 100);
        assert_eq!(BudgetExecutionReport::candidates(&storage).unwrap().len(), 1);

        CycleService::new(&storage)
            .update(
                cycle.id,
                CycleUpdate {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(BudgetExecutionReport::candidates(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_csv_quotes_names_with_commas() {
        let (_dir, storage) = test_storage();
        let pocket = PocketService::new(&storage).create("Transport", None).unwrap();
        let cycle = CycleService::new(&storage)
            .create(NewCycle {
                pocket_id: pocket.id,
                name: "March, week 1".into(),
                budget: Some(Money::from_units(100)),
                date_init: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                date_end: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            })
            .unwrap();
        let cash = PaymentTypeService::new(&storage).create("Cash").unwrap();
        ExpenseService::new(&storage)
            .create("Taxi, airport", Money::from_units(10), cycle.id, cash.id)
            .unwrap();

        let report =
            BudgetExecutionReport::generate(&storage, cycle.id, &ProgressThresholds::hybrid())
                .unwrap();
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, ["Cycle", "Expense ID", "Expense", "Value", "Date"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "March, week 1");
        assert_eq!(&rows[0][2], "Taxi, airport");
        assert_eq!(&rows[0][3], "10.00");
        assert_eq!(&rows[1][2], "TOTAL");
        assert_eq!(&rows[1][3], "10.00");
    }

    #[test]
    fn test_missing_cycle() {
        let (_dir, storage) = test_storage();
        let err = BudgetExecutionReport::generate(
            &storage,
            CycleId::new(99),
            &ProgressThresholds::hybrid(),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
