//! Hybrid transaction CLI commands

use clap::Subcommand;

use super::{parse_date, parse_id, parse_money, today};
use crate::config::settings::Settings;
use crate::display::format_transaction_list;
use crate::error::FintrackResult;
use crate::models::{FixedExpenseId, HybridTransactionId};
use crate::services::hybrid::TransactionUpdate;
use crate::services::{FixedExpenseService, HybridTransactionService};
use crate::storage::Storage;

/// Hybrid transaction subcommands
#[derive(Subcommand)]
pub enum HybridCommands {
    /// List the transactions of a hybrid expense
    List {
        /// Fixed expense ID
        expense: String,
    },
    /// Spend from a hybrid expense's budget
    Add {
        /// Fixed expense ID
        expense: String,
        amount: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Transaction date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

pub fn handle_hybrid_command(
    storage: &Storage,
    settings: &Settings,
    cmd: HybridCommands,
) -> FintrackResult<()> {
    let service = HybridTransactionService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        HybridCommands::List { expense } => {
            let id: FixedExpenseId = parse_id(&expense, "Fixed expense")?;
            let transactions = service.list(id)?;
            let expense = FixedExpenseService::new(storage).get_required(id)?;
            println!(
                "{}: {} of {} spent, {} remaining",
                expense.concept_name,
                expense.current_spent().format_with_symbol(currency),
                expense.budget_limit().format_with_symbol(currency),
                expense.remaining().format_with_symbol(currency)
            );
            println!("{}", format_transaction_list(&transactions, today(), currency));
        }

        HybridCommands::Add {
            expense,
            amount,
            description,
            date,
        } => {
            let id: FixedExpenseId = parse_id(&expense, "Fixed expense")?;
            let transaction = service.add(
                id,
                parse_money(&amount)?,
                &description,
                parse_date(date.as_deref())?,
            )?;
            let expense = FixedExpenseService::new(storage).get_required(id)?;
            println!(
                "Recorded {} against '{}' ({} remaining)",
                transaction.amount.format_with_symbol(currency),
                expense.concept_name,
                expense.remaining().format_with_symbol(currency)
            );
            println!("  ID: {}", transaction.id);
        }

        HybridCommands::Edit {
            id,
            amount,
            description,
            date,
        } => {
            let id: HybridTransactionId = parse_id(&id, "Hybrid transaction")?;
            let changes = TransactionUpdate {
                amount: amount.as_deref().map(parse_money).transpose()?,
                description,
                transaction_date: date.as_deref().map(|d| parse_date(Some(d))).transpose()?,
            };
            let transaction = service.update(id, changes)?;
            println!(
                "Updated transaction {} ({})",
                transaction.id,
                transaction.amount.format_with_symbol(currency)
            );
        }

        HybridCommands::Delete { id } => {
            let transaction = service.delete(parse_id(&id, "Hybrid transaction")?)?;
            println!("Deleted transaction {}", transaction.id);
        }
    }

    Ok(())
}
