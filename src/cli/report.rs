//! Report CLI commands
//!
//! The monthly summary and the budget execution of a cycle.

use clap::Args;

use super::{parse_id, parse_month};
use crate::config::settings::Settings;
use crate::error::FintrackResult;
use crate::models::CycleId;
use crate::reports::{BudgetExecutionReport, MonthlySummary};
use crate::storage::Storage;

#[derive(Args)]
pub struct SummaryArgs {
    /// Month (YYYY-MM), default current
    #[arg(short, long)]
    pub month: Option<String>,
    /// Print CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

#[derive(Args)]
pub struct BudgetArgs {
    /// Cycle ID; lists the active cycles when omitted
    pub cycle: Option<String>,
    /// Print CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    args: SummaryArgs,
) -> FintrackResult<()> {
    let month = parse_month(args.month.as_deref(), settings)?;
    let summary = MonthlySummary::generate(storage, month, settings.balance_tolerance)?;

    if args.csv {
        summary.export_csv(&mut std::io::stdout().lock())?;
    } else {
        print!("{}", summary.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    args: BudgetArgs,
) -> FintrackResult<()> {
    let currency = &settings.currency_symbol;

    let Some(cycle) = args.cycle else {
        let cycles = BudgetExecutionReport::candidates(storage)?;
        if cycles.is_empty() {
            println!("No active cycles. Create one with 'fintrack cycle create'.");
        }
        for cycle in cycles {
            println!(
                "{:<8} {:<24} {} to {}  {}",
                cycle.id.to_string(),
                cycle.name,
                cycle.date_init,
                cycle.date_end,
                cycle.budget.format_with_symbol(currency)
            );
        }
        return Ok(());
    };

    let cycle_id: CycleId = parse_id(&cycle, "Cycle")?;
    let report = BudgetExecutionReport::generate(storage, cycle_id, &settings.hybrid_thresholds)?;

    if args.csv {
        report.export_csv(&mut std::io::stdout().lock())?;
    } else {
        print!("{}", report.format_terminal(currency));
    }

    Ok(())
}
