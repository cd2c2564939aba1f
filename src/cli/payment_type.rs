//! Payment type CLI commands

use clap::Subcommand;

use crate::display::format_payment_type_list;
use crate::error::FintrackResult;
use crate::services::PaymentTypeService;
use crate::storage::Storage;

/// Payment type subcommands
#[derive(Subcommand)]
pub enum PaymentTypeCommands {
    /// List payment types
    List {
        /// Include inactive payment types
        #[arg(short, long)]
        all: bool,
    },
    /// Create a payment type
    Create {
        name: String,
    },
    /// Rename a payment type
    Rename {
        /// Payment type name or ID
        payment_type: String,
        new_name: String,
    },
    /// Switch a payment type between active and inactive
    Toggle {
        /// Payment type name or ID
        payment_type: String,
    },
}

pub fn handle_payment_type_command(storage: &Storage, cmd: PaymentTypeCommands) -> FintrackResult<()> {
    let service = PaymentTypeService::new(storage);

    match cmd {
        PaymentTypeCommands::List { all } => {
            println!("{}", format_payment_type_list(&service.list(all)?));
        }

        PaymentTypeCommands::Create { name } => {
            let payment_type = service.create(&name)?;
            println!("Created payment type: {} ({})", payment_type.name, payment_type.id);
        }

        PaymentTypeCommands::Rename {
            payment_type,
            new_name,
        } => {
            let found = service.resolve(&payment_type)?;
            let renamed = service.rename(found.id, &new_name)?;
            println!("Renamed '{}' to '{}'", found.name, renamed.name);
        }

        PaymentTypeCommands::Toggle { payment_type } => {
            let found = service.resolve(&payment_type)?;
            let toggled = service.toggle_active(found.id)?;
            println!(
                "{} is now {}",
                toggled.name,
                if toggled.active { "active" } else { "inactive" }
            );
        }
    }

    Ok(())
}
