//! Reports module for fintrack
//!
//! The monthly summary (salary against fixed and daily spending) and the
//! budget execution report for a cycle.

pub mod budget_execution;
pub mod monthly_summary;

pub use budget_execution::BudgetExecutionReport;
pub use monthly_summary::{BalanceStatus, MonthlySummary};
