//! Setup and identity commands
//!
//! `init`, `config` and `whoami` only touch the settings file.

use clap::Args;

use crate::config::{BudgetPaths, Settings};
use crate::error::{BudgetError, BudgetResult};
use crate::models::Participant;
use crate::storage::JsonStore;

/// Options for `duo init`
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Budget identifier shared by both participants
    #[arg(long)]
    pub budget: Option<String>,

    /// Display name of the primary participant
    #[arg(long)]
    pub primary_name: Option<String>,

    /// Display name of the secondary participant
    #[arg(long)]
    pub secondary_name: Option<String>,

    /// Currency symbol shown after amounts
    #[arg(long)]
    pub currency: Option<String>,
}

/// Create the data directory and write settings
pub fn handle_init_command(
    paths: &BudgetPaths,
    settings: &mut Settings,
    args: InitArgs,
) -> BudgetResult<()> {
    if let Some(budget) = args.budget {
        let budget = budget.trim().to_string();
        if budget.is_empty() {
            return Err(BudgetError::Validation("Budget id cannot be empty".into()));
        }
        JsonStore::check_budget_id(&budget)?;
        settings.budget_id = budget;
    }
    if let Some(name) = args.primary_name {
        settings.participants.primary = name;
    }
    if let Some(name) = args.secondary_name {
        settings.participants.secondary = name;
    }
    if let Some(symbol) = args.currency {
        settings.currency_symbol = symbol;
    }

    paths.ensure_directories()?;
    settings.save(paths)?;

    println!("Initialized duo-budget at: {}", paths.base_dir().display());
    println!("Budget:       {}", settings.budget_id);
    println!(
        "Participants: {} (primary), {} (secondary)",
        settings.participants.primary, settings.participants.secondary
    );
    println!();
    println!("Run 'duo whoami primary' or 'duo whoami secondary' to pick who you are.");
    Ok(())
}

/// Show paths, settings and the periods that hold data
pub fn handle_config_command(
    paths: &BudgetPaths,
    settings: &Settings,
    store: &JsonStore,
) -> BudgetResult<()> {
    println!("duo-budget Configuration");
    println!("========================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Data directory: {}", paths.data_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Initialized:    {}", paths.is_initialized());
    println!();
    println!("Settings:");
    println!("  Budget:      {}", settings.budget_id);
    println!("  Currency:    {}", settings.currency_symbol);
    println!("  Primary:     {}", settings.participants.primary);
    println!("  Secondary:   {}", settings.participants.secondary);
    match settings.current_participant {
        Some(p) => println!("  You are:     {} ({})", settings.participant_name(p), p),
        None => println!("  You are:     (not selected)"),
    }

    let periods = store.periods()?;
    println!();
    if periods.is_empty() {
        println!("No periods with data yet.");
    } else {
        let listed: Vec<String> = periods.iter().map(|p| p.to_string()).collect();
        println!("Periods with data: {}", listed.join(", "));
    }
    Ok(())
}

/// Show, set or clear the participant using this machine
pub fn handle_whoami_command(
    paths: &BudgetPaths,
    settings: &mut Settings,
    participant: Option<String>,
    clear: bool,
) -> BudgetResult<()> {
    if clear {
        settings.current_participant = None;
        settings.save(paths)?;
        println!("Participant cleared.");
        return Ok(());
    }

    match participant {
        Some(raw) => {
            let participant: Participant = raw.parse().map_err(BudgetError::Validation)?;
            settings.current_participant = Some(participant);
            settings.save(paths)?;
            println!(
                "You are now recording as {} ({}).",
                settings.participant_name(participant),
                participant
            );
        }
        None => match settings.current_participant {
            Some(p) => println!("{} ({})", settings.participant_name(p), p),
            None => println!("No participant selected."),
        },
    }
    Ok(())
}
