//! Period metadata CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_summary;
use crate::error::BudgetResult;
use crate::models::amount::format_amount;
use crate::models::MetadataPatch;
use crate::reports::AggregationEngine;
use crate::services::{MetadataService, GOAL_PRESETS};
use crate::storage::{JsonStore, TransactionStore};

use super::resolve_period;

/// Metadata subcommands
#[derive(Subcommand, Debug)]
pub enum MetaCommands {
    /// Show the income and savings record of a period
    Show {
        /// Budget period (YYYY-MM, defaults to current month)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Update fields of a period's record; omitted fields are left untouched
    Set {
        #[arg(short, long)]
        period: Option<String>,

        /// Income of the primary participant
        #[arg(long)]
        income_primary: Option<f64>,

        /// Income of the secondary participant
        #[arg(long)]
        income_secondary: Option<f64>,

        /// Surplus brought over from the previous period
        #[arg(long)]
        carry_over: Option<f64>,

        /// Amount set aside this period
        #[arg(long)]
        savings_target: Option<f64>,

        /// Additional savings this period
        #[arg(long)]
        savings_extra: Option<f64>,

        /// Savings goal for this period (0 for none)
        #[arg(long)]
        savings_goal: Option<f64>,

        /// Accumulated savings across periods
        #[arg(long)]
        savings_accumulated: Option<f64>,
    },

    /// Set the savings goal to a percentage of total income
    Goal {
        /// Percentage of total income (1-100; presets are 10, 20 and 30)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=100))]
        percent: u8,

        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a metadata command
pub fn handle_meta_command(
    store: &JsonStore,
    settings: &Settings,
    cmd: MetaCommands,
) -> BudgetResult<()> {
    let service = MetadataService::new(store);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        MetaCommands::Show { period } => {
            let period = resolve_period(period.as_deref())?;
            let metadata = service.load_or_init(&period)?;
            let expenses = store.list(&period)?;
            let totals = AggregationEngine::compute(&metadata, &expenses);
            print!(
                "{}",
                format_summary(&period, &metadata, &totals, &settings.participants, symbol)
            );
        }

        MetaCommands::Set {
            period,
            income_primary,
            income_secondary,
            carry_over,
            savings_target,
            savings_extra,
            savings_goal,
            savings_accumulated,
        } => {
            let period = resolve_period(period.as_deref())?;
            let patch = MetadataPatch {
                income_primary,
                income_secondary,
                carry_over,
                savings_target,
                savings_extra,
                savings_goal,
                savings_accumulated,
            };
            if patch.is_empty() {
                println!("Nothing to update. Pass at least one field, e.g. --income-primary 2000");
                return Ok(());
            }

            let updated = service.update(&period, &patch)?;
            println!("Updated {}.", period);
            println!(
                "Total income: {}",
                format_amount(updated.income_primary + updated.income_secondary, symbol)
            );
            println!(
                "Savings this period: {}",
                format_amount(updated.savings_target + updated.savings_extra, symbol)
            );
        }

        MetaCommands::Goal { percent, period } => {
            let period = resolve_period(period.as_deref())?;
            let goal = service.apply_goal_preset(&period, percent)?;
            println!(
                "Savings goal for {} set to {} ({}% of income).",
                period,
                format_amount(goal, symbol),
                percent
            );
            if !GOAL_PRESETS.contains(&percent) {
                println!(
                    "Common presets: {}",
                    GOAL_PRESETS
                        .iter()
                        .map(|p| format!("{}%", p))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
    }

    Ok(())
}
