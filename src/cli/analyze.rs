//! Analysis command
//!
//! Drives a [`Dashboard`] for one period: applies the filter, prints the
//! category distribution and optionally expands one category into concepts.

use std::sync::Arc;

use clap::Args;

use crate::config::Settings;
use crate::display::{format_distribution, format_expense_list, format_filter};
use crate::display::report::separator;
use crate::error::{BudgetError, BudgetResult};
use crate::models::amount::format_amount;
use crate::models::normalize_label;
use crate::reports::FilterSpec;
use crate::services::{Dashboard, DashboardState};
use crate::storage::JsonStore;

use super::resolve_period;

/// Options for `duo analyze`
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    #[arg(short, long)]
    pub period: Option<String>,

    /// Only this category ("all" for every category)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only this participant ("all" for both)
    #[arg(short = 'w', long)]
    pub participant: Option<String>,

    /// Case-insensitive text matched against concept and category
    #[arg(short, long)]
    pub search: Option<String>,

    /// Expand a category into its concepts
    #[arg(long)]
    pub expand: Option<String>,

    /// Also list the matching expenses
    #[arg(long)]
    pub list: bool,
}

/// Handle the analyze command
pub fn handle_analyze_command(
    store: Arc<JsonStore>,
    settings: &Settings,
    args: AnalyzeArgs,
) -> BudgetResult<()> {
    let period = resolve_period(args.period.as_deref())?;
    let filter = FilterSpec::from_choices(
        args.category.as_deref(),
        args.participant.as_deref(),
        args.search.as_deref(),
    )
    .map_err(BudgetError::Validation)?;

    let mut state = DashboardState::new(period);
    state.filter = filter;
    state.selected_category = args.expand.as_deref().map(normalize_label);

    let dashboard = Dashboard::attach(store, state)?;
    let view = dashboard.view()?;
    let symbol = settings.currency_symbol.as_str();

    println!("Analysis for {}", view.period);
    println!("{}", format_filter(&dashboard.state().filter));
    if !view.categories.is_empty() {
        println!("Categories: {}", view.categories.join(", "));
    }
    println!();
    print!("{}", format_distribution(&view.distribution, symbol));

    let filtered_total: f64 = view.filtered.iter().map(|e| e.amount()).sum();
    println!(
        "Matching: {} expense(s), {} of {}",
        view.filtered.len(),
        format_amount(filtered_total, symbol),
        format_amount(view.totals.total_expenses, symbol)
    );

    if let Some(expanded) = &dashboard.state().selected_category {
        println!();
        match &view.selected {
            Some(group) => {
                println!(
                    "{} ({})",
                    group.category,
                    format_amount(group.total, symbol)
                );
                println!("{}", separator(40));
                for concept in &group.by_concept {
                    println!(
                        "  {:<24} {:>3}x {:>14}",
                        concept.concept,
                        concept.expenses.len(),
                        format_amount(concept.total(), symbol)
                    );
                }
            }
            None => println!("No expenses in category '{}'.", expanded),
        }
    }

    if args.list {
        println!();
        print!(
            "{}",
            format_expense_list(&view.filtered, &settings.participants, symbol)
        );
    }

    Ok(())
}
