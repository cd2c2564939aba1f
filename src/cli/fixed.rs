//! Fixed expense CLI commands

use clap::Subcommand;

use super::{parse_id, parse_money, parse_month, today};
use crate::config::settings::Settings;
use crate::display::{format_fixed_board, format_fixed_details};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{ExpenseKind, FixedExpenseId, PaymentStatus, StatusFilter};
use crate::services::fixed_expense::{
    pocket_label, status_counts, totals, FixedExpenseUpdate, NewFixedExpense,
};
use crate::services::{FixedExpenseService, PocketService};
use crate::storage::Storage;

/// Fixed expense subcommands
#[derive(Subcommand)]
pub enum FixedCommands {
    /// Add a fixed monthly expense
    Add {
        /// Pocket name or ID
        pocket: String,
        /// Concept (e.g., "Rent")
        concept: String,
        /// Amount due
        amount: String,
        /// Day of the month the payment is due (1-31)
        #[arg(short, long, default_value_t = 1)]
        day: u32,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Add a hybrid expense: a budget spent through several transactions
    AddHybrid {
        /// Pocket name or ID
        pocket: String,
        /// Concept (e.g., "Groceries")
        concept: String,
        /// Budget limit
        limit: String,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show the month's fixed expenses grouped by pocket
    List {
        #[arg(short, long)]
        month: Option<String>,
        /// all, paid or pending
        #[arg(short, long, default_value = "all")]
        status: String,
    },
    /// Show one fixed expense
    Show {
        /// Fixed expense ID
        id: String,
    },
    /// Edit a fixed expense
    Edit {
        /// Fixed expense ID
        id: String,
        #[arg(long)]
        pocket: Option<String>,
        #[arg(short, long)]
        concept: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        day: Option<u32>,
        /// Budget limit (hybrid)
        #[arg(short, long)]
        limit: Option<String>,
        /// fixed or hybrid
        #[arg(short, long)]
        kind: Option<String>,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Toggle the paid flag
    Toggle {
        /// Fixed expense ID
        id: String,
    },
    /// Delete a fixed expense
    Delete {
        /// Fixed expense ID
        id: String,
    },
    /// Copy a month's fixed expenses into another month as unpaid
    Copy {
        /// Source month (YYYY-MM)
        from: String,
        /// Target month (YYYY-MM)
        to: String,
    },
}

pub fn handle_fixed_command(
    storage: &Storage,
    settings: &Settings,
    cmd: FixedCommands,
) -> FintrackResult<()> {
    let service = FixedExpenseService::new(storage);
    let pockets = PocketService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        FixedCommands::Add {
            pocket,
            concept,
            amount,
            day,
            month,
        } => {
            let pocket = pockets.resolve(&pocket)?;
            let month = parse_month(month.as_deref(), settings)?;
            let expense = service.create(NewFixedExpense::fixed(
                pocket.id,
                concept,
                parse_money(&amount)?,
                day,
                month,
            ))?;
            println!(
                "Added fixed expense '{}' ({}) due {}",
                expense.concept_name,
                expense.amount.format_with_symbol(currency),
                expense.due_date()
            );
            println!("  ID: {}", expense.id);
        }

        FixedCommands::AddHybrid {
            pocket,
            concept,
            limit,
            month,
        } => {
            let pocket = pockets.resolve(&pocket)?;
            let month = parse_month(month.as_deref(), settings)?;
            let expense = service.create(NewFixedExpense::hybrid(
                pocket.id,
                concept,
                parse_money(&limit)?,
                month,
            ))?;
            println!(
                "Added hybrid expense '{}' with a budget of {}",
                expense.concept_name,
                expense.budget_limit().format_with_symbol(currency)
            );
            println!("  ID: {}", expense.id);
        }

        FixedCommands::List { month, status } => {
            let month = parse_month(month.as_deref(), settings)?;
            let filter: StatusFilter = status.parse().map_err(FintrackError::Validation)?;
            let today = today();

            let expenses = service.list_by_month(month, filter)?;
            let month_totals = totals(&expenses);
            let overdue = status_counts(&expenses, today)
                .get(&PaymentStatus::Overdue)
                .copied()
                .unwrap_or(0);
            let groups = service.board(month, filter, today)?;

            println!("Fixed expenses: {}", month.name());
            println!(
                "{}",
                format_fixed_board(
                    &groups,
                    &month_totals,
                    today,
                    &settings.hybrid_thresholds,
                    currency
                )
            );
            if overdue > 0 {
                println!("{} payment(s) overdue", overdue);
            }
        }

        FixedCommands::Show { id } => {
            let expense = service.get_required(parse_id(&id, "Fixed expense")?)?;
            let pocket_name = pockets
                .get(expense.pocket_id)?
                .map(|p| p.name)
                .unwrap_or_else(|| pocket_label(expense.pocket_id));
            print!(
                "{}",
                format_fixed_details(&expense, &pocket_name, today(), currency)
            );
        }

        FixedCommands::Edit {
            id,
            pocket,
            concept,
            amount,
            day,
            limit,
            kind,
            month,
        } => {
            let id: FixedExpenseId = parse_id(&id, "Fixed expense")?;
            let changes = FixedExpenseUpdate {
                pocket_id: match pocket {
                    Some(p) => Some(pockets.resolve(&p)?.id),
                    None => None,
                },
                concept_name: concept,
                kind: kind
                    .as_deref()
                    .map(|k| k.parse::<ExpenseKind>().map_err(FintrackError::Validation))
                    .transpose()?,
                amount: amount.as_deref().map(parse_money).transpose()?,
                payment_day: day,
                budget_limit: limit.as_deref().map(parse_money).transpose()?,
                month: month
                    .as_deref()
                    .map(|m| parse_month(Some(m), settings))
                    .transpose()?,
            };
            let expense = service.update(id, changes)?;
            println!("Updated fixed expense: {}", expense.concept_name);
        }

        FixedCommands::Toggle { id } => {
            let expense = service.toggle_paid(parse_id(&id, "Fixed expense")?, today())?;
            match expense.paid_date {
                Some(date) if expense.is_paid => {
                    println!("Marked '{}' as paid on {}", expense.concept_name, date)
                }
                _ => println!("Marked '{}' as pending", expense.concept_name),
            }
        }

        FixedCommands::Delete { id } => {
            let expense = service.delete(parse_id(&id, "Fixed expense")?)?;
            println!("Deleted fixed expense: {}", expense.concept_name);
        }

        FixedCommands::Copy { from, to } => {
            let from = parse_month(Some(&from), settings)?;
            let to = parse_month(Some(&to), settings)?;
            let created = service.copy_month(from, to)?;
            println!(
                "Copied {} fixed expense(s) from {} to {}",
                created.len(),
                from.name(),
                to.name()
            );
        }
    }

    Ok(())
}
