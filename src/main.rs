use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use duo_budget::cli::{
    handle_analyze_command, handle_carry_command, handle_config_command,
    handle_consolidate_command, handle_expense_command, handle_export_command,
    handle_init_command, handle_meta_command, handle_summary_command, handle_whoami_command,
    AnalyzeArgs, ExpenseCommands, ExportArgs, InitArgs, MetaCommands,
};
use duo_budget::config::paths::DATA_DIR_ENV;
use duo_budget::config::{BudgetPaths, Settings};
use duo_budget::log::init_logging;
use duo_budget::storage::JsonStore;

#[derive(Parser)]
#[command(
    name = "duo",
    version,
    about = "Household budget tracking for two",
    long_about = "duo keeps a shared monthly budget for two people: incomes and \
                  savings per month, a log of categorized expenses, live totals \
                  and savings consolidation."
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base directory for settings and data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and settings
    Init(InitArgs),

    /// Show current configuration and paths
    Config,

    /// Show or choose which participant you are
    Whoami {
        /// primary or secondary
        participant: Option<String>,

        /// Forget the selected participant
        #[arg(long, conflicts_with = "participant")]
        clear: bool,
    },

    /// Income and savings record of a period
    #[command(subcommand)]
    Meta(MetaCommands),

    /// Record, list and delete expenses
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Show the totals of a period
    Summary {
        #[arg(short, long)]
        period: Option<String>,

        /// Include the category and concept breakdown
        #[arg(short, long)]
        categories: bool,
    },

    /// Filter expenses and show the category distribution
    Analyze(AnalyzeArgs),

    /// Move this period's savings into the accumulated total
    Consolidate {
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Carry the period's final balance into the next period
    Carry {
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Export a period
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = match cli.data_dir {
        Some(dir) => BudgetPaths::with_base_dir(dir),
        None => BudgetPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;
    debug!(base = %paths.base_dir().display(), budget = %settings.budget_id, "settings loaded");

    let open_store = |settings: &Settings| JsonStore::open(paths.clone(), settings.budget_id.clone());

    match cli.command {
        Some(Commands::Init(args)) => handle_init_command(&paths, &mut settings, args)?,
        Some(Commands::Config) => {
            handle_config_command(&paths, &settings, &open_store(&settings)?)?
        }
        Some(Commands::Whoami { participant, clear }) => {
            handle_whoami_command(&paths, &mut settings, participant, clear)?
        }
        Some(Commands::Meta(cmd)) => handle_meta_command(&open_store(&settings)?, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&open_store(&settings)?, &settings, cmd)?
        }
        Some(Commands::Summary { period, categories }) => {
            handle_summary_command(&open_store(&settings)?, &settings, period, categories)?
        }
        Some(Commands::Analyze(args)) => {
            handle_analyze_command(Arc::new(open_store(&settings)?), &settings, args)?
        }
        Some(Commands::Consolidate { period }) => {
            handle_consolidate_command(&open_store(&settings)?, &settings, period)?
        }
        Some(Commands::Carry { period }) => {
            handle_carry_command(&open_store(&settings)?, &settings, period)?
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&open_store(&settings)?, &settings, args)?
        }
        None => {
            println!("duo - household budget tracking for two");
            println!();
            println!("Run 'duo --help' for usage information.");
            println!("Run 'duo init' to get started.");
        }
    }

    Ok(())
}
