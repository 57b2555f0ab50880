//! Summary, consolidation and carry-forward commands

use crate::config::Settings;
use crate::display::{format_category_tree, format_summary};
use crate::error::BudgetResult;
use crate::models::amount::format_amount;
use crate::reports::AggregationEngine;
use crate::services::{carry_forward, ConsolidationOutcome, ConsolidationService, MetadataService};
use crate::storage::{JsonStore, TransactionStore};

use super::resolve_period;

/// Print the totals of a period, optionally with the category breakdown
pub fn handle_summary_command(
    store: &JsonStore,
    settings: &Settings,
    period: Option<String>,
    categories: bool,
) -> BudgetResult<()> {
    let period = resolve_period(period.as_deref())?;
    let metadata = MetadataService::new(store).load_or_init(&period)?;
    let expenses = store.list(&period)?;
    let totals = AggregationEngine::compute(&metadata, &expenses);
    let symbol = settings.currency_symbol.as_str();

    print!(
        "{}",
        format_summary(&period, &metadata, &totals, &settings.participants, symbol)
    );
    if categories {
        println!();
        print!("{}", format_category_tree(&totals, symbol));
    }
    Ok(())
}

/// Move the period's savings into the accumulated total
pub fn handle_consolidate_command(
    store: &JsonStore,
    settings: &Settings,
    period: Option<String>,
) -> BudgetResult<()> {
    let period = resolve_period(period.as_deref())?;
    let symbol = settings.currency_symbol.as_str();

    match ConsolidationService::new(store).consolidate(&period)? {
        ConsolidationOutcome::Consolidated {
            amount,
            new_accumulated,
        } => {
            println!(
                "Consolidated {} of savings for {}.",
                format_amount(amount, symbol),
                period
            );
            println!(
                "Accumulated savings: {}",
                format_amount(new_accumulated, symbol)
            );
        }
        ConsolidationOutcome::NothingToConsolidate => {
            println!("Nothing to consolidate for {}.", period);
        }
    }
    Ok(())
}

/// Carry the period's final balance into the next period
pub fn handle_carry_command(
    store: &JsonStore,
    settings: &Settings,
    period: Option<String>,
) -> BudgetResult<()> {
    let period = resolve_period(period.as_deref())?;
    let balance = carry_forward(store, &period)?;
    println!(
        "Carried {} from {} into {}.",
        format_amount(balance, &settings.currency_symbol),
        period,
        period.next()
    );
    Ok(())
}
