//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display:
//! tables, relative dates, and status and progress labels.

pub mod cycle;
pub mod daily;
pub mod fixed;
pub mod pocket;

pub use cycle::{format_cycle_list, format_expense_list};
pub use daily::{format_daily_list, format_daily_summary};
pub use fixed::{format_fixed_board, format_fixed_details, format_transaction_list};
pub use pocket::{format_concept_list, format_payment_type_list, format_pocket_list};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::month::short_month_name;
use crate::models::{PaymentStatus, ProgressLevel};

/// Human label for a date relative to `today`
///
/// "Today", "Yesterday", "2 days ago", the weekday name up to six days back,
/// otherwise the short month and day ("Mar 5"). Future dates always use the
/// short form.
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days_back = (today - date).num_days();
    match days_back {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2 => "2 days ago".to_string(),
        3..=6 => weekday_name(date.weekday()).to_string(),
        _ => format!("{} {}", short_month_name(date.month()), date.day()),
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn status_label(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Overdue => "OVERDUE",
        PaymentStatus::Due => "due",
        PaymentStatus::Paid => "paid",
    }
}

pub fn level_label(level: ProgressLevel) -> &'static str {
    match level {
        ProgressLevel::Normal => "",
        ProgressLevel::Warning => "[warning]",
        ProgressLevel::Danger => "[DANGER]",
    }
}

/// Text progress bar, `width` cells wide, full at 100% and beyond
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}
