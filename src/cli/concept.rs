//! Concept CLI commands
//!
//! Planned line items inside a pocket.

use clap::Subcommand;

use super::{parse_id, parse_money};
use crate::config::settings::Settings;
use crate::display::format_concept_list;
use crate::error::FintrackResult;
use crate::models::ConceptId;
use crate::services::{ConceptService, PocketService};
use crate::storage::Storage;

/// Concept subcommands
#[derive(Subcommand)]
pub enum ConceptCommands {
    /// Add a concept to a pocket
    Add {
        /// Pocket name or ID
        pocket: String,
        /// Concept name
        name: String,
        /// Planned value (e.g., "1200" or "1,200.50")
        value: String,
    },
    /// List the concepts of a pocket
    List {
        /// Pocket name or ID
        pocket: String,
    },
    /// Edit a concept
    Edit {
        /// Concept ID
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        value: Option<String>,
    },
    /// Mark a concept as paid
    Paid {
        /// Concept ID
        id: String,
    },
    /// Mark a concept as not paid
    Unpaid {
        /// Concept ID
        id: String,
    },
    /// Delete a concept
    Delete {
        /// Concept ID
        id: String,
    },
}

pub fn handle_concept_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ConceptCommands,
) -> FintrackResult<()> {
    let service = ConceptService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        ConceptCommands::Add {
            pocket,
            name,
            value,
        } => {
            let pocket = PocketService::new(storage).resolve(&pocket)?;
            let concept = service.create(pocket.id, &name, parse_money(&value)?)?;
            println!(
                "Added concept '{}' ({}) to {}",
                concept.name,
                concept.value.format_with_symbol(currency),
                pocket.name
            );
            println!("  ID: {}", concept.id);
        }

        ConceptCommands::List { pocket } => {
            let pocket = PocketService::new(storage).resolve(&pocket)?;
            let concepts = service.list_by_pocket(pocket.id)?;
            println!("{}", pocket.name);
            println!("{}", format_concept_list(&concepts, currency));
        }

        ConceptCommands::Edit { id, name, value } => {
            let id: ConceptId = parse_id(&id, "Concept")?;
            let value = value.as_deref().map(parse_money).transpose()?;
            let concept = service.update(id, name.as_deref(), value)?;
            println!("Updated concept: {}", concept.name);
        }

        ConceptCommands::Paid { id } => {
            let concept = service.set_paid(parse_id(&id, "Concept")?, true)?;
            println!("Marked '{}' as paid", concept.name);
        }

        ConceptCommands::Unpaid { id } => {
            let concept = service.set_paid(parse_id(&id, "Concept")?, false)?;
            println!("Marked '{}' as not paid", concept.name);
        }

        ConceptCommands::Delete { id } => {
            let concept = service.delete(parse_id(&id, "Concept")?)?;
            println!("Deleted concept: {}", concept.name);
        }
    }

    Ok(())
}
