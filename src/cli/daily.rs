//! Daily expense CLI commands

use clap::Subcommand;

use super::{parse_date, parse_id, parse_money, parse_month, today};
use crate::config::settings::Settings;
use crate::display::{format_daily_list, format_daily_summary};
use crate::error::FintrackResult;
use crate::models::DailyExpenseId;
use crate::services::daily_expense::DailyExpenseUpdate;
use crate::services::DailyExpenseService;
use crate::storage::Storage;

/// Daily expense subcommands
#[derive(Subcommand)]
pub enum DailyCommands {
    /// Record a daily expense
    Add {
        description: String,
        amount: String,
        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },
    /// List a month's daily expenses, most recent first
    List {
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Edit a daily expense
    Edit {
        /// Daily expense ID
        id: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a daily expense
    Delete {
        /// Daily expense ID
        id: String,
    },
    /// Set the month's daily budget
    Budget {
        amount: String,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show spending against the month's daily budget
    Summary {
        #[arg(short, long)]
        month: Option<String>,
    },
}

pub fn handle_daily_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DailyCommands,
) -> FintrackResult<()> {
    let service = DailyExpenseService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        DailyCommands::Add {
            description,
            amount,
            date,
        } => {
            let expense = service.add(
                &description,
                parse_money(&amount)?,
                parse_date(date.as_deref())?,
            )?;
            println!(
                "Recorded '{}' ({}) on {}",
                expense.description,
                expense.amount.format_with_symbol(currency),
                expense.date
            );
            println!("  ID: {}", expense.id);
        }

        DailyCommands::List { month } => {
            let month = parse_month(month.as_deref(), settings)?;
            let expenses = service.list_by_month(month)?;
            println!("Daily expenses: {}", month.name());
            println!("{}", format_daily_list(&expenses, today(), currency));
        }

        DailyCommands::Edit {
            id,
            description,
            amount,
            date,
        } => {
            let id: DailyExpenseId = parse_id(&id, "Daily expense")?;
            let changes = DailyExpenseUpdate {
                description,
                amount: amount.as_deref().map(parse_money).transpose()?,
                date: date.as_deref().map(|d| parse_date(Some(d))).transpose()?,
            };
            let expense = service.update(id, changes)?;
            println!("Updated daily expense: {}", expense.description);
        }

        DailyCommands::Delete { id } => {
            let expense = service.delete(parse_id(&id, "Daily expense")?)?;
            println!("Deleted daily expense: {}", expense.description);
        }

        DailyCommands::Budget { amount, month } => {
            let month = parse_month(month.as_deref(), settings)?;
            let budget = service.set_budget(month, parse_money(&amount)?)?;
            println!(
                "Daily budget for {} set to {}",
                month.name(),
                budget.monthly_budget.format_with_symbol(currency)
            );
        }

        DailyCommands::Summary { month } => {
            let month = parse_month(month.as_deref(), settings)?;
            let summary = service.summary(month, &settings.daily_thresholds)?;
            print!("{}", format_daily_summary(&summary, currency));
        }
    }

    Ok(())
}
