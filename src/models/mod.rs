//! Core data models for fintrack
//!
//! This module contains the data structures of the personal finance domain:
//! pockets, cycles, expenses, fixed and daily expenses, salaries, etc.

pub mod concept;
pub mod cycle;
pub mod daily_expense;
pub mod expense;
pub mod fixed_expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod payment_type;
pub mod pocket;
pub mod progress;
pub mod salary;

pub use concept::Concept;
pub use cycle::Cycle;
pub use daily_expense::{DailyBudget, DailyExpense};
pub use expense::Expense;
pub use fixed_expense::{
    ExpenseKind, FixedExpense, HybridTransaction, PaymentStatus, StatusFilter,
};
pub use ids::{
    ConceptId, CycleId, DailyExpenseId, ExpenseId, FixedExpenseId, HybridTransactionId,
    PaymentTypeId, PocketId,
};
pub use money::Money;
pub use month::{Month, MonthParseError};
pub use payment_type::PaymentType;
pub use pocket::Pocket;
pub use progress::{ProgressLevel, ProgressThresholds};
pub use salary::Salary;
