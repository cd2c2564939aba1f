//! Cycle CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use super::{parse_date, parse_id, parse_money};
use crate::config::settings::Settings;
use crate::display::format_cycle_list;
use crate::error::{FintrackError, FintrackResult};
use crate::models::CycleId;
use crate::services::cycle::{CycleUpdate, NewCycle};
use crate::services::{CycleService, PocketService};
use crate::storage::Storage;

/// Cycle subcommands
#[derive(Subcommand)]
pub enum CycleCommands {
    /// Create a cycle on a pocket
    Create {
        /// Pocket name or ID
        pocket: String,
        /// Cycle name
        name: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Budget; defaults to the sum of the pocket's concepts
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// List cycles
    List {
        /// Include closed cycles
        #[arg(short, long)]
        all: bool,
    },
    /// Edit a cycle
    Edit {
        /// Cycle ID
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        budget: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Close a cycle
    Close {
        /// Cycle ID
        id: String,
    },
    /// Reopen a closed cycle
    Reopen {
        /// Cycle ID
        id: String,
    },
    /// Delete a cycle without expenses
    Delete {
        /// Cycle ID
        id: String,
    },
}

pub fn handle_cycle_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CycleCommands,
) -> FintrackResult<()> {
    let service = CycleService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        CycleCommands::Create {
            pocket,
            name,
            from,
            to,
            budget,
        } => {
            let pocket = PocketService::new(storage).resolve(&pocket)?;
            let cycle = service.create(NewCycle {
                pocket_id: pocket.id,
                name,
                budget: budget.as_deref().map(parse_money).transpose()?,
                date_init: parse_date(Some(&from))?,
                date_end: parse_date(Some(&to))?,
            })?;
            println!("Created cycle: {} ({})", cycle.name, pocket.name);
            println!("  Budget: {}", cycle.budget.format_with_symbol(currency));
            println!("  Period: {} to {}", cycle.date_init, cycle.date_end);
            println!("  ID: {}", cycle.id);
        }

        CycleCommands::List { all } => {
            let cycles = service.list(all)?;
            let pocket_names: HashMap<_, _> = PocketService::new(storage)
                .list(true)?
                .into_iter()
                .map(|p| (p.id, p.name))
                .collect();
            println!("{}", format_cycle_list(&cycles, &pocket_names, currency));
        }

        CycleCommands::Edit {
            id,
            name,
            budget,
            from,
            to,
        } => {
            let id: CycleId = parse_id(&id, "Cycle")?;
            let changes = CycleUpdate {
                name,
                budget: budget.as_deref().map(parse_money).transpose()?,
                date_init: from.as_deref().map(|d| parse_date(Some(d))).transpose()?,
                date_end: to.as_deref().map(|d| parse_date(Some(d))).transpose()?,
                active: None,
            };
            if changes.name.is_none()
                && changes.budget.is_none()
                && changes.date_init.is_none()
                && changes.date_end.is_none()
            {
                return Err(FintrackError::Validation(
                    "No changes specified. Use --name, --budget, --from or --to".into(),
                ));
            }
            let cycle = service.update(id, changes)?;
            println!("Updated cycle: {}", cycle.name);
        }

        CycleCommands::Close { id } => {
            let cycle = set_active(&service, &id, false)?;
            println!("Closed cycle: {}", cycle);
        }

        CycleCommands::Reopen { id } => {
            let cycle = set_active(&service, &id, true)?;
            println!("Reopened cycle: {}", cycle);
        }

        CycleCommands::Delete { id } => {
            let cycle = service.delete(parse_id(&id, "Cycle")?)?;
            println!("Deleted cycle: {}", cycle.name);
        }
    }

    Ok(())
}

fn set_active(service: &CycleService<'_>, id: &str, active: bool) -> FintrackResult<String> {
    let cycle = service.update(
        parse_id(id, "Cycle")?,
        CycleUpdate {
            active: Some(active),
            ..Default::default()
        },
    )?;
    Ok(cycle.name)
}
