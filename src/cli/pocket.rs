//! Pocket CLI commands
//!
//! Implements CLI commands for pocket management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_pocket_list;
use crate::error::FintrackResult;
use crate::services::pocket::PocketUpdate;
use crate::services::PocketService;
use crate::storage::Storage;

/// Pocket subcommands
#[derive(Subcommand)]
pub enum PocketCommands {
    /// Create a new pocket
    Create {
        /// Pocket name
        name: String,
        /// Short description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List pockets with their planned totals
    List {
        /// Include inactive pockets
        #[arg(short, long)]
        all: bool,
    },
    /// Edit a pocket
    Edit {
        /// Pocket name or ID
        pocket: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Hide a pocket from pickers
    Deactivate {
        /// Pocket name or ID
        pocket: String,
    },
    /// Make a pocket available again
    Activate {
        /// Pocket name or ID
        pocket: String,
    },
    /// Delete a pocket and its concepts
    Delete {
        /// Pocket name or ID
        pocket: String,
    },
}

/// Handle a pocket command
pub fn handle_pocket_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PocketCommands,
) -> FintrackResult<()> {
    let service = PocketService::new(storage);

    match cmd {
        PocketCommands::Create { name, description } => {
            let pocket = service.create(&name, description.as_deref())?;
            println!("Created pocket: {}", pocket.name);
            println!("  ID: {}", pocket.id);
        }

        PocketCommands::List { all } => {
            let summaries = service.list_with_totals(all)?;
            println!("{}", format_pocket_list(&summaries, &settings.currency_symbol));
        }

        PocketCommands::Edit {
            pocket,
            name,
            description,
        } => {
            let found = service.resolve(&pocket)?;
            if name.is_none() && description.is_none() {
                println!("No changes specified. Use --name or --description.");
                return Ok(());
            }
            let updated = service.update(
                found.id,
                PocketUpdate {
                    name,
                    description,
                    active: None,
                },
            )?;
            println!("Updated pocket: {}", updated.name);
        }

        PocketCommands::Deactivate { pocket } => {
            let found = service.resolve(&pocket)?;
            let updated = service.update(
                found.id,
                PocketUpdate {
                    active: Some(false),
                    ..Default::default()
                },
            )?;
            println!("Deactivated pocket: {}", updated.name);
        }

        PocketCommands::Activate { pocket } => {
            let found = service.resolve(&pocket)?;
            let updated = service.update(
                found.id,
                PocketUpdate {
                    active: Some(true),
                    ..Default::default()
                },
            )?;
            println!("Activated pocket: {}", updated.name);
        }

        PocketCommands::Delete { pocket } => {
            let found = service.resolve(&pocket)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted pocket: {}", deleted.name);
        }
    }

    Ok(())
}
