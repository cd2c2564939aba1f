//! Expense CLI commands
//!
//! Spending recorded against a cycle.

use std::collections::HashMap;

use clap::Subcommand;

use super::{parse_id, parse_money};
use crate::config::settings::Settings;
use crate::display::format_expense_list;
use crate::error::FintrackResult;
use crate::models::{CycleId, ExpenseId};
use crate::services::expense::ExpenseUpdate;
use crate::services::{ExpenseService, PaymentTypeService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense in a cycle
    Add {
        /// Cycle ID
        cycle: String,
        /// What was bought
        name: String,
        /// Amount spent
        value: String,
        /// Payment type name or ID
        #[arg(short, long, default_value = "Cash")]
        payment: String,
    },
    /// List expenses, newest first
    List {
        /// Only expenses of this cycle
        #[arg(short, long)]
        cycle: Option<String>,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        value: Option<String>,
        /// Move to another cycle
        #[arg(short, long)]
        cycle: Option<String>,
        /// Payment type name or ID
        #[arg(short, long)]
        payment: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> FintrackResult<()> {
    let service = ExpenseService::new(storage);
    let payment_types = PaymentTypeService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        ExpenseCommands::Add {
            cycle,
            name,
            value,
            payment,
        } => {
            let cycle_id: CycleId = parse_id(&cycle, "Cycle")?;
            let payment_type = payment_types.resolve(&payment)?;
            let expense = service.create(&name, parse_money(&value)?, cycle_id, payment_type.id)?;
            println!(
                "Recorded expense '{}' for {} ({})",
                expense.name,
                expense.value.format_with_symbol(currency),
                payment_type.name
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { cycle } => {
            let expenses = match cycle {
                Some(cycle) => service.list_by_cycle(parse_id(&cycle, "Cycle")?)?,
                None => service.list()?,
            };
            let names: HashMap<_, _> = payment_types
                .list(true)?
                .into_iter()
                .map(|p| (p.id, p.name))
                .collect();
            println!("{}", format_expense_list(&expenses, &names, currency));
        }

        ExpenseCommands::Edit {
            id,
            name,
            value,
            cycle,
            payment,
        } => {
            let id: ExpenseId = parse_id(&id, "Expense")?;
            let changes = ExpenseUpdate {
                name,
                value: value.as_deref().map(parse_money).transpose()?,
                cycle_id: cycle.as_deref().map(|c| parse_id(c, "Cycle")).transpose()?,
                payment_type_id: match payment {
                    Some(p) => Some(payment_types.resolve(&p)?.id),
                    None => None,
                },
            };
            let expense = service.update(id, changes)?;
            println!("Updated expense: {}", expense.name);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.delete(parse_id(&id, "Expense")?)?;
            println!("Deleted expense: {}", expense.name);
        }
    }

    Ok(())
}
