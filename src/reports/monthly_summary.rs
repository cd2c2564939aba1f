//! Monthly Summary Report
//!
//! Where the month's salary goes: unpaid fixed expenses, the daily budget
//! and what is left over.

use std::fmt;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Month, StatusFilter};
use crate::services::fixed_expense::totals;
use crate::services::{DailyExpenseService, FixedExpenseService, IncomeService};
use crate::storage::Storage;

/// Whether the month ends up ahead, behind or roughly even
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    Surplus,
    Deficit,
    Balanced,
}

impl BalanceStatus {
    /// Classify `available` against a symmetric `tolerance` around zero
    pub fn classify(available: Money, tolerance: Money) -> Self {
        if available > tolerance {
            Self::Surplus
        } else if available < -tolerance {
            Self::Deficit
        } else {
            Self::Balanced
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surplus => write!(f, "Surplus"),
            Self::Deficit => write!(f, "Deficit"),
            Self::Balanced => write!(f, "Balanced"),
        }
    }
}

/// Monthly Summary Report
#[derive(Debug, Clone)]
pub struct MonthlySummary {
    pub month: Month,
    pub salary: Money,
    /// Sum of `amount` over unpaid fixed expenses; hybrids add nothing
    pub total_fixed_expenses: Money,
    /// Unspent budget of unpaid hybrids, not part of the balance
    pub hybrid_remaining: Money,
    pub total_daily_spent: Money,
    pub daily_budget: Money,
    /// `salary - total_fixed_expenses`
    pub available_after_fixed: Money,
    /// `available_after_fixed - daily_budget`
    pub available_overall: Money,
    pub fixed_percentage: f64,
    pub daily_budget_percentage: f64,
    pub fixed_count: usize,
    pub fixed_paid_count: usize,
    pub status: BalanceStatus,
}

impl MonthlySummary {
    /// Generate the summary for a month
    pub fn generate(storage: &Storage, month: Month, tolerance: Money) -> FintrackResult<Self> {
        let salary = IncomeService::new(storage).get_salary(month)?.monthly_amount;

        let fixed = FixedExpenseService::new(storage).list_by_month(month, StatusFilter::All)?;
        let fixed_totals = totals(&fixed);

        let daily = DailyExpenseService::new(storage);
        let daily_budget = daily.get_budget(month)?;
        let total_daily_spent: Money = daily.list_by_month(month)?.iter().map(|e| e.amount).sum();

        Ok(Self::compute(
            month,
            salary,
            fixed_totals.unpaid_amount,
            total_daily_spent,
            daily_budget,
            tolerance,
        )
        .with_fixed_counts(fixed_totals.count, fixed_totals.paid_count)
        .with_hybrid_remaining(fixed_totals.outstanding - fixed_totals.unpaid_amount))
    }

    /// Derive the summary figures from the month's raw amounts
    pub fn compute(
        month: Month,
        salary: Money,
        total_fixed_expenses: Money,
        total_daily_spent: Money,
        daily_budget: Money,
        tolerance: Money,
    ) -> Self {
        let available_after_fixed = salary - total_fixed_expenses;
        let available_overall = available_after_fixed - daily_budget;

        Self {
            month,
            salary,
            total_fixed_expenses,
            hybrid_remaining: Money::zero(),
            total_daily_spent,
            daily_budget,
            available_after_fixed,
            available_overall,
            fixed_percentage: total_fixed_expenses.percentage_of(salary),
            daily_budget_percentage: daily_budget.percentage_of(salary),
            fixed_count: 0,
            fixed_paid_count: 0,
            status: BalanceStatus::classify(available_overall, tolerance),
        }
    }

    fn with_fixed_counts(mut self, count: usize, paid: usize) -> Self {
        self.fixed_count = count;
        self.fixed_paid_count = paid;
        self
    }

    fn with_hybrid_remaining(mut self, remaining: Money) -> Self {
        self.hybrid_remaining = remaining;
        self
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str(&format!("Monthly Summary: {}\n", self.month.name()));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str(&format!("{:<28} {:>20}\n", "Salary", money(self.salary)));
        output.push_str(&format!(
            "{:<28} {:>20}  ({:.1}%)\n",
            "Unpaid fixed expenses",
            money(self.total_fixed_expenses),
            self.fixed_percentage
        ));
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Available after fixed",
            money(self.available_after_fixed)
        ));
        output.push_str(&format!(
            "{:<28} {:>20}  ({:.1}%)\n",
            "Daily budget",
            money(self.daily_budget),
            self.daily_budget_percentage
        ));
        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>20}  {}\n",
            "Available overall",
            money(self.available_overall),
            self.status
        ));
        output.push('\n');
        output.push_str(&format!(
            "Daily spending so far: {}\n",
            money(self.total_daily_spent)
        ));
        output.push_str(&format!(
            "Fixed expenses paid: {}/{}\n",
            self.fixed_paid_count, self.fixed_count
        ));
        if !self.hybrid_remaining.is_zero() {
            output.push_str(&format!(
                "Unspent hybrid budgets: {}\n",
                money(self.hybrid_remaining)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        let rows: [(&str, String); 9] = [
            ("salary", to_decimal(self.salary)),
            ("total_fixed_expenses", to_decimal(self.total_fixed_expenses)),
            ("hybrid_remaining", to_decimal(self.hybrid_remaining)),
            ("total_daily_spent", to_decimal(self.total_daily_spent)),
            ("daily_budget", to_decimal(self.daily_budget)),
            ("available_after_fixed", to_decimal(self.available_after_fixed)),
            ("available_overall", to_decimal(self.available_overall)),
            ("fixed_percentage", format!("{:.2}", self.fixed_percentage)),
            (
                "daily_budget_percentage",
                format!("{:.2}", self.daily_budget_percentage),
            ),
        ];

        writeln!(writer, "Month,Metric,Value").map_err(|e| FintrackError::Export(e.to_string()))?;
        for (metric, value) in rows {
            writeln!(writer, "{},{},{}", self.month, metric, value)
                .map_err(|e| FintrackError::Export(e.to_string()))?;
        }
        writeln!(writer, "{},status,{}", self.month, self.status)
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        Ok(())
    }
}

fn to_decimal(amount: Money) -> String {
    format!("{:.2}", amount.cents() as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseKind;
    use crate::services::fixed_expense::NewFixedExpense;
    use crate::services::{test_storage, HybridTransactionService, PocketService};
    use chrono::NaiveDate;

    fn jan() -> Month {
        Month::parse("2024-01").unwrap()
    }

    fn tolerance() -> Money {
        Money::from_units(1000)
    }

    #[test]
    fn test_compute_available() {
        let summary = MonthlySummary::compute(
            jan(),
            Money::from_units(3_000_000),
            Money::from_units(1_200_000),
            Money::from_units(100_000),
            Money::from_units(500_000),
            tolerance(),
        );
        assert_eq!(summary.available_after_fixed, Money::from_units(1_800_000));
        assert_eq!(summary.available_overall, Money::from_units(1_300_000));
        assert_eq!(summary.fixed_percentage, 40.0);
        assert_eq!(summary.status, BalanceStatus::Surplus);
    }

    #[test]
    fn test_zero_salary_percentages() {
        let summary = MonthlySummary::compute(
            jan(),
            Money::zero(),
            Money::from_units(100),
            Money::zero(),
            Money::from_units(100),
            tolerance(),
        );
        assert_eq!(summary.fixed_percentage, 0.0);
        assert_eq!(summary.daily_budget_percentage, 0.0);
        assert_eq!(summary.status, BalanceStatus::Balanced);
    }

    #[test]
    fn test_balance_status_tolerance() {
        let t = tolerance();
        assert_eq!(BalanceStatus::classify(Money::from_units(1000), t), BalanceStatus::Balanced);
        assert_eq!(BalanceStatus::classify(Money::from_units(1001), t), BalanceStatus::Surplus);
        assert_eq!(BalanceStatus::classify(Money::from_units(-1000), t), BalanceStatus::Balanced);
        assert_eq!(BalanceStatus::classify(Money::from_units(-1001), t), BalanceStatus::Deficit);
    }

    #[test]
    fn test_generate_counts_unpaid_fixed_amounts() {
        let (_dir, storage) = test_storage();
        let pocket = PocketService::new(&storage).create("Housing", None).unwrap();
        let fixed = FixedExpenseService::new(&storage);

        let rent = fixed
            .create(NewFixedExpense::fixed(pocket.id, "Rent", Money::from_units(1000), 5, jan()))
            .unwrap();
        fixed
            .create(NewFixedExpense::fixed(pocket.id, "Internet", Money::from_units(200), 10, jan()))
            .unwrap();
        let groceries = fixed
            .create(NewFixedExpense::hybrid(pocket.id, "Groceries", Money::from_units(500), jan()))
            .unwrap();
        assert_eq!(groceries.kind, ExpenseKind::Hybrid);

        let today = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        fixed.set_paid(rent.id, true, today).unwrap();
        HybridTransactionService::new(&storage)
            .add(groceries.id, Money::from_units(150), "market", today)
            .unwrap();

        IncomeService::new(&storage)
            .set_salary(jan(), Money::from_units(5000))
            .unwrap();
        let daily = DailyExpenseService::new(&storage);
        daily.set_budget(jan(), Money::from_units(800)).unwrap();
        daily.add("Coffee", Money::from_units(20), today).unwrap();

        let summary = MonthlySummary::generate(&storage, jan(), tolerance()).unwrap();
        // Only the unpaid Internet bill; the hybrid's amount is 0
        assert_eq!(summary.total_fixed_expenses, Money::from_units(200));
        assert_eq!(summary.hybrid_remaining, Money::from_units(350));
        assert_eq!(summary.total_daily_spent, Money::from_units(20));
        assert_eq!(summary.available_after_fixed, Money::from_units(4800));
        assert_eq!(summary.available_overall, Money::from_units(4000));
        assert!(summary
            .format_terminal("$")
            .contains("Unspent hybrid budgets: $350.00"));
        assert_eq!(summary.fixed_count, 3);
        assert_eq!(summary.fixed_paid_count, 1);
        assert_eq!(summary.status, BalanceStatus::Surplus);
    }

    #[test]
    fn test_export_csv() {
        let summary = MonthlySummary::compute(
            jan(),
            Money::from_units(100),
            Money::from_units(50),
            Money::zero(),
            Money::zero(),
            tolerance(),
        );
        let mut buffer = Vec::new();
        summary.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.starts_with("Month,Metric,Value\n"));
        assert!(csv.contains("2024-01,salary,100.00"));
        assert!(csv.contains("2024-01,status,Balanced"));
    }
}
