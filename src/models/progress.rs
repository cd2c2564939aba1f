//! Budget progress classification
//!
//! Spending against a budget is shown as a percentage and bucketed into a
//! progress level so the display can flag budgets that are running out.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// How close a budget is to being used up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressLevel {
    Normal,
    Warning,
    Danger,
}

impl fmt::Display for ProgressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// Percentages at which a budget turns to warning and danger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressThresholds {
    pub warning: f64,
    pub danger: f64,
}

impl ProgressThresholds {
    /// Thresholds used for the daily expenses budget
    pub fn daily() -> Self {
        Self {
            warning: 70.0,
            danger: 90.0,
        }
    }

    /// Thresholds used for hybrid fixed expenses
    pub fn hybrid() -> Self {
        Self {
            warning: 80.0,
            danger: 100.0,
        }
    }

    pub fn level(&self, percentage: f64) -> ProgressLevel {
        if percentage >= self.danger {
            ProgressLevel::Danger
        } else if percentage >= self.warning {
            ProgressLevel::Warning
        } else {
            ProgressLevel::Normal
        }
    }
}

/// `spent / budget * 100`, capped at 100; 0 when the budget is zero
pub fn usage_percentage(spent: Money, budget: Money) -> f64 {
    if budget.is_zero() {
        return 0.0;
    }
    spent.percentage_of(budget).min(100.0)
}
