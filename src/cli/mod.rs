//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod concept;
pub mod cycle;
pub mod daily;
pub mod expense;
pub mod export;
pub mod fixed;
pub mod hybrid;
pub mod payment_type;
pub mod pocket;
pub mod report;
pub mod salary;

pub use audit::handle_audit_command;
pub use concept::{handle_concept_command, ConceptCommands};
pub use cycle::{handle_cycle_command, CycleCommands};
pub use daily::{handle_daily_command, DailyCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use fixed::{handle_fixed_command, FixedCommands};
pub use hybrid::{handle_hybrid_command, HybridCommands};
pub use payment_type::{handle_payment_type_command, PaymentTypeCommands};
pub use pocket::{handle_pocket_command, PocketCommands};
pub use report::{handle_budget_command, handle_summary_command, BudgetArgs, SummaryArgs};
pub use salary::{handle_salary_command, SalaryCommands};

use std::str::FromStr;

use chrono::{Local, NaiveDate};

use crate::config::settings::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Month};

/// Today's date in local time
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn parse_money(input: &str) -> FintrackResult<Money> {
    Money::parse(input).map_err(|e| {
        FintrackError::Validation(format!(
            "Invalid amount '{}'. Use a format like '1200' or '1,200.50'. Error: {}",
            input, e
        ))
    })
}

/// Parse `YYYY-MM` within the configured year bounds; `None` is the current
/// month
pub(crate) fn parse_month(input: Option<&str>, settings: &Settings) -> FintrackResult<Month> {
    match input {
        None => Ok(Month::current()),
        Some(s) => Month::parse_with_bounds(
            s.trim(),
            settings.year_bounds.min,
            settings.year_bounds.max,
        )
        .map_err(|e| FintrackError::Validation(e.to_string())),
    }
}

/// Parse `YYYY-MM-DD`; `None` is today
pub(crate) fn parse_date(input: Option<&str>) -> FintrackResult<NaiveDate> {
    match input {
        None => Ok(today()),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            FintrackError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
    }
}

/// Parse an entity id given as "7" or in its display form ("fix-7")
pub(crate) fn parse_id<T: FromStr>(input: &str, entity_type: &'static str) -> FintrackResult<T> {
    input.parse().map_err(|_| FintrackError::NotFound {
        entity_type,
        identifier: input.to_string(),
    })
}
