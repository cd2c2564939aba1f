//! Salary CLI commands
//!
//! Monthly income and the month's financial configuration.

use clap::Subcommand;

use super::{parse_money, parse_month};
use crate::config::settings::Settings;
use crate::error::FintrackResult;
use crate::services::IncomeService;
use crate::storage::Storage;

/// Salary subcommands
#[derive(Subcommand)]
pub enum SalaryCommands {
    /// Set the salary for a month
    Set {
        /// Monthly amount
        amount: String,
        /// Month (YYYY-MM), default current
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show the salary for a month
    Show {
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List every recorded salary
    List,
    /// Show salary, fixed expenses, their pockets and the daily budget
    Config {
        #[arg(short, long)]
        month: Option<String>,
    },
}

pub fn handle_salary_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SalaryCommands,
) -> FintrackResult<()> {
    let service = IncomeService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        SalaryCommands::Set { amount, month } => {
            let month = parse_month(month.as_deref(), settings)?;
            let salary = service.set_salary(month, parse_money(&amount)?)?;
            println!(
                "Salary for {} set to {}",
                month.name(),
                salary.monthly_amount.format_with_symbol(currency)
            );
        }

        SalaryCommands::Show { month } => {
            let month = parse_month(month.as_deref(), settings)?;
            let salary = service.get_salary(month)?;
            println!(
                "{}: {}",
                month.name(),
                salary.monthly_amount.format_with_symbol(currency)
            );
        }

        SalaryCommands::List => {
            let salaries = service.list_salaries()?;
            if salaries.is_empty() {
                println!("No salaries recorded.");
            }
            for salary in salaries {
                println!(
                    "{:<16} {:>18}",
                    salary.month.name(),
                    salary.monthly_amount.format_with_symbol(currency)
                );
            }
        }

        SalaryCommands::Config { month } => {
            let month = parse_month(month.as_deref(), settings)?;
            let config = service.financial_configuration(month)?;

            println!("Financial configuration: {}", month.name());
            println!(
                "  Salary:       {}",
                config.salary.monthly_amount.format_with_symbol(currency)
            );
            println!(
                "  Daily budget: {}",
                config.daily_budget.monthly_budget.format_with_symbol(currency)
            );
            println!("  Fixed expenses: {}", config.fixed_expenses.len());
            for pocket in &config.pockets {
                println!("    {}", pocket.name);
                for expense in config.fixed_expenses.iter().filter(|e| e.pocket_id == pocket.id) {
                    println!(
                        "      {:<24} {:>16}",
                        expense.concept_name,
                        expense.planned_amount().format_with_symbol(currency)
                    );
                }
            }
        }
    }

    Ok(())
}
