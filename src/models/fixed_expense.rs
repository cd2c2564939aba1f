//! Fixed expense model
//!
//! A fixed expense is a monthly obligation in a pocket. It comes in two kinds:
//!
//! - `fixed`: a single amount due on a payment day
//! - `hybrid`: a budget cap consumed by any number of transactions
//!
//! Hybrid transactions are stored nested inside their expense.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{FixedExpenseId, HybridTransactionId, PocketId};
use super::money::Money;
use super::month::Month;
use super::progress::usage_percentage;

/// The kind of a fixed expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    #[default]
    Fixed,
    Hybrid,
}

impl ExpenseKind {
    pub fn is_hybrid(&self) -> bool {
        matches!(self, Self::Hybrid)
    }
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl std::str::FromStr for ExpenseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(format!("Unknown expense kind '{}' (expected fixed or hybrid)", other)),
        }
    }
}

/// Payment status of a fixed expense relative to a given day.
///
/// Variants are declared in display priority order, so sorting by status puts
/// overdue first and paid last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Overdue,
    Due,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue => write!(f, "Overdue"),
            Self::Due => write!(f, "Due"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

/// List filter for fixed expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Pending,
}

impl StatusFilter {
    pub fn matches(&self, expense: &FixedExpense) -> bool {
        match self {
            Self::All => true,
            Self::Paid => expense.is_paid,
            Self::Pending => !expense.is_paid,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "paid" => Ok(Self::Paid),
            "pending" | "unpaid" => Ok(Self::Pending),
            other => Err(format!("Unknown filter '{}' (expected all, paid or pending)", other)),
        }
    }
}

/// Validation errors for fixed expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedExpenseValidationError {
    EmptyConceptName,
    NonPositiveAmount,
    InvalidPaymentDay(u32),
    NonPositiveBudgetLimit,
}

impl fmt::Display for FixedExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyConceptName => write!(f, "Concept name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Amount must be greater than 0"),
            Self::InvalidPaymentDay(day) => {
                write!(f, "Payment day must be between 1 and 31 (got {})", day)
            }
            Self::NonPositiveBudgetLimit => {
                write!(f, "Hybrid expenses need a budget limit greater than 0")
            }
        }
    }
}

impl std::error::Error for FixedExpenseValidationError {}

/// A single spend against a hybrid expense's budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridTransaction {
    pub id: HybridTransactionId,
    pub fixed_expense_id: FixedExpenseId,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl HybridTransaction {
    pub fn new(
        id: HybridTransactionId,
        fixed_expense_id: FixedExpenseId,
        amount: Money,
        description: impl Into<String>,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            fixed_expense_id,
            amount,
            description: description.into(),
            transaction_date,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: FixedExpenseId,
    pub pocket_id: PocketId,
    pub concept_name: String,
    pub amount: Money,
    pub payment_day: u32,
    #[serde(default)]
    pub is_paid: bool,
    pub month: Month,
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub kind: ExpenseKind,
    #[serde(default)]
    pub budget_limit: Option<Money>,
    #[serde(default)]
    pub transactions: Vec<HybridTransaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FixedExpense {
    /// A regular fixed expense of `amount` due on `payment_day`
    pub fn new_fixed(
        id: FixedExpenseId,
        pocket_id: PocketId,
        concept_name: impl Into<String>,
        amount: Money,
        payment_day: u32,
        month: Month,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            pocket_id,
            concept_name: concept_name.into(),
            amount,
            payment_day,
            is_paid: false,
            month,
            paid_date: None,
            kind: ExpenseKind::Fixed,
            budget_limit: None,
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// A hybrid expense with a spending cap
    pub fn new_hybrid(
        id: FixedExpenseId,
        pocket_id: PocketId,
        concept_name: impl Into<String>,
        budget_limit: Money,
        month: Month,
    ) -> Self {
        let mut expense = Self::new_fixed(id, pocket_id, concept_name, Money::zero(), 1, month);
        expense.kind = ExpenseKind::Hybrid;
        expense.budget_limit = Some(budget_limit);
        expense
    }

    pub fn is_hybrid(&self) -> bool {
        self.kind.is_hybrid()
    }

    /// Hybrid expenses always carry amount 0 and payment day 1; regular ones
    /// carry no budget limit.
    pub fn normalize(&mut self) {
        match self.kind {
            ExpenseKind::Hybrid => {
                self.amount = Money::zero();
                self.payment_day = 1;
            }
            ExpenseKind::Fixed => {
                self.budget_limit = None;
            }
        }
    }

    pub fn validate(&self) -> Result<(), FixedExpenseValidationError> {
        if self.concept_name.trim().is_empty() {
            return Err(FixedExpenseValidationError::EmptyConceptName);
        }

        match self.kind {
            ExpenseKind::Fixed => {
                if !self.amount.is_positive() {
                    return Err(FixedExpenseValidationError::NonPositiveAmount);
                }
                if !(1..=31).contains(&self.payment_day) {
                    return Err(FixedExpenseValidationError::InvalidPaymentDay(
                        self.payment_day,
                    ));
                }
            }
            ExpenseKind::Hybrid => {
                if !self.budget_limit().is_positive() {
                    return Err(FixedExpenseValidationError::NonPositiveBudgetLimit);
                }
            }
        }

        Ok(())
    }

    pub fn budget_limit(&self) -> Money {
        self.budget_limit.unwrap_or_default()
    }

    /// Sum of all hybrid transactions
    pub fn current_spent(&self) -> Money {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    /// `budget_limit - current_spent`; negative once the cap is blown
    pub fn remaining(&self) -> Money {
        self.budget_limit() - self.current_spent()
    }

    pub fn usage_percentage(&self) -> f64 {
        usage_percentage(self.current_spent(), self.budget_limit())
    }

    pub fn is_exceeded(&self) -> bool {
        self.current_spent() > self.budget_limit()
    }

    /// The date this expense falls due.
    ///
    /// Hybrid budgets run for the whole month, so they fall due on its last day.
    pub fn due_date(&self) -> NaiveDate {
        match self.kind {
            ExpenseKind::Fixed => self.month.day(self.payment_day),
            ExpenseKind::Hybrid => self.month.last_day(),
        }
    }

    pub fn status_on(&self, today: NaiveDate) -> PaymentStatus {
        if self.is_paid {
            PaymentStatus::Paid
        } else if self.due_date() < today {
            PaymentStatus::Overdue
        } else {
            PaymentStatus::Due
        }
    }

    pub fn status(&self) -> PaymentStatus {
        self.status_on(Local::now().date_naive())
    }

    /// Amount this expense still commits for the month.
    ///
    /// Paid expenses commit nothing. Unpaid hybrids commit whatever is left of
    /// their budget.
    pub fn outstanding(&self) -> Money {
        if self.is_paid {
            return Money::zero();
        }
        match self.kind {
            ExpenseKind::Fixed => self.amount,
            ExpenseKind::Hybrid => self.remaining().non_negative(),
        }
    }

    /// The amount shown in totals: the fixed amount, or the cap for hybrids
    pub fn planned_amount(&self) -> Money {
        match self.kind {
            ExpenseKind::Fixed => self.amount,
            ExpenseKind::Hybrid => self.budget_limit(),
        }
    }

    pub fn set_paid(&mut self, paid: bool, today: NaiveDate) {
        self.is_paid = paid;
        self.paid_date = if paid { Some(today) } else { None };
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn transaction(&self, id: HybridTransactionId) -> Option<&HybridTransaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Transactions with the most recent date first
    pub fn transactions_newest_first(&self) -> Vec<HybridTransaction> {
        let mut txns = self.transactions.clone();
        txns.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        txns
    }

    /// A fresh unpaid copy of this expense for another month
    pub fn carried_into(&self, id: FixedExpenseId, month: Month) -> Self {
        let now = Utc::now();
        Self {
            id,
            pocket_id: self.pocket_id,
            concept_name: self.concept_name.clone(),
            amount: self.amount,
            payment_day: self.payment_day,
            is_paid: false,
            month,
            paid_date: None,
            kind: self.kind,
            budget_limit: self.budget_limit,
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
