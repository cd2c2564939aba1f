use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_audit_command, handle_budget_command, handle_concept_command, handle_cycle_command,
    handle_daily_command, handle_expense_command, handle_export_command, handle_fixed_command,
    handle_hybrid_command, handle_payment_type_command, handle_pocket_command,
    handle_salary_command, handle_summary_command, BudgetArgs, SummaryArgs,
};
use fintrack::config::{paths::FintrackPaths, settings::Settings};
use fintrack::storage::{init, Storage};
use fintrack::{logging, FintrackResult};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Terminal-based personal finance tracker",
    long_about = "fintrack keeps track of your monthly salary, fixed and hybrid \
                  expenses grouped by pocket, daily spending against a budget, and \
                  spending cycles, all from the command line."
)]
struct Cli {
    /// Show debug output on stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with default pockets and payment types
    Init,

    /// Show current configuration and paths
    Config,

    /// Pocket management commands
    #[command(subcommand)]
    Pocket(fintrack::cli::PocketCommands),

    /// Concepts planned inside a pocket
    #[command(subcommand)]
    Concept(fintrack::cli::ConceptCommands),

    /// Spending cycle commands
    #[command(subcommand)]
    Cycle(fintrack::cli::CycleCommands),

    /// Expenses recorded against a cycle
    #[command(subcommand)]
    Expense(fintrack::cli::ExpenseCommands),

    /// Payment type commands
    #[command(subcommand, alias = "pt")]
    PaymentType(fintrack::cli::PaymentTypeCommands),

    /// Monthly salary commands
    #[command(subcommand)]
    Salary(fintrack::cli::SalaryCommands),

    /// Fixed and hybrid monthly expenses
    #[command(subcommand)]
    Fixed(fintrack::cli::FixedCommands),

    /// Transactions against a hybrid expense
    #[command(subcommand)]
    Hybrid(fintrack::cli::HybridCommands),

    /// Daily expenses and the daily budget
    #[command(subcommand)]
    Daily(fintrack::cli::DailyCommands),

    /// Monthly summary: salary, fixed and daily spending
    Summary(SummaryArgs),

    /// Budget execution of a cycle
    Budget(BudgetArgs),

    /// Export data
    #[command(subcommand)]
    Export(fintrack::cli::ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = FintrackPaths::new().context("Cannot determine the fintrack data directory")?;
    let settings = Settings::load_or_create(&paths).context("Cannot load settings")?;

    if let Err(e) = run(cli.command, &paths, settings) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Option<Commands>, paths: &FintrackPaths, settings: Settings) -> FintrackResult<()> {
    let Some(command) = command else {
        println!("fintrack - Terminal-based personal finance tracker");
        println!();
        println!("Run 'fintrack init' to set up your data directory.");
        println!("Run 'fintrack --help' for usage information.");
        return Ok(());
    };

    if let Commands::Init = command {
        println!("Initializing fintrack at: {}", paths.data_dir().display());
        init::initialize_storage(paths)?;
        let mut settings = settings;
        settings.setup_completed = true;
        settings.save(paths)?;
        println!("Initialization complete!");
        println!();
        println!("Default pockets have been created:");
        for (name, description) in init::DEFAULT_POCKETS {
            println!("  - {} ({})", name, description);
        }
        println!();
        println!("Run 'fintrack pocket list' to see them.");
        return Ok(());
    }

    if init::needs_initialization(paths) {
        tracing::info!(path = %paths.data_dir().display(), "first run, seeding defaults");
        init::initialize_storage(paths)?;
    }

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match command {
        Commands::Init => {}
        Commands::Config => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!(
                "  Balance tolerance: {}",
                settings
                    .balance_tolerance
                    .format_with_symbol(&settings.currency_symbol)
            );
            println!(
                "  Daily thresholds:  warning {}%, danger {}%",
                settings.daily_thresholds.warning, settings.daily_thresholds.danger
            );
            println!(
                "  Hybrid thresholds: warning {}%, danger {}%",
                settings.hybrid_thresholds.warning, settings.hybrid_thresholds.danger
            );
            println!(
                "  Year range:        {}-{}",
                settings.year_bounds.min, settings.year_bounds.max
            );
        }
        Commands::Pocket(cmd) => handle_pocket_command(&storage, &settings, cmd)?,
        Commands::Concept(cmd) => handle_concept_command(&storage, &settings, cmd)?,
        Commands::Cycle(cmd) => handle_cycle_command(&storage, &settings, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, &settings, cmd)?,
        Commands::PaymentType(cmd) => handle_payment_type_command(&storage, cmd)?,
        Commands::Salary(cmd) => handle_salary_command(&storage, &settings, cmd)?,
        Commands::Fixed(cmd) => handle_fixed_command(&storage, &settings, cmd)?,
        Commands::Hybrid(cmd) => handle_hybrid_command(&storage, &settings, cmd)?,
        Commands::Daily(cmd) => handle_daily_command(&storage, &settings, cmd)?,
        Commands::Summary(args) => handle_summary_command(&storage, &settings, args)?,
        Commands::Budget(args) => handle_budget_command(&storage, &settings, args)?,
        Commands::Export(cmd) => handle_export_command(&storage, &settings, cmd)?,
        Commands::Audit { limit } => handle_audit_command(&storage, limit)?,
    }

    Ok(())
}
