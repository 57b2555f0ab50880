//! Expense CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list, format_filter};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{NewExpense, Participant};
use crate::reports::{FilterEngine, FilterSpec};
use crate::services::ExpenseService;
use crate::storage::JsonStore;

use super::resolve_period;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Category (e.g. "comida")
        category: String,

        /// What was bought (e.g. "supermercado")
        concept: String,

        /// Amount, greater than 0
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Expense date (YYYY-MM-DD, defaults to the first day of the period)
        #[arg(short, long)]
        date: Option<String>,

        /// Record on behalf of a participant instead of yourself
        #[arg(long = "as")]
        on_behalf_of: Option<String>,

        #[arg(short, long)]
        period: Option<String>,
    },

    /// List expenses of a period
    List {
        #[arg(short, long)]
        period: Option<String>,

        /// Only this category ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Only this participant ("all" for both)
        #[arg(short = 'w', long)]
        participant: Option<String>,

        /// Case-insensitive text matched against concept and category
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete an expense by ID
    Delete {
        /// Expense ID as shown by `expense list` (or a full UUID)
        id: String,

        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &JsonStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let service = ExpenseService::new(store);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            category,
            concept,
            amount,
            date,
            on_behalf_of,
            period,
        } => {
            let period = resolve_period(period.as_deref())?;
            let participant = match on_behalf_of {
                Some(raw) => raw
                    .parse::<Participant>()
                    .map_err(BudgetError::Validation)?,
                None => settings.require_participant()?,
            };

            let mut input = NewExpense::new(category, concept, amount, participant);
            if let Some(date) = date {
                input = input.on(date);
            }

            let id = service.add(&period, input)?;
            let expense = service.resolve(&period, &id.as_uuid().to_string())?;
            println!("Recorded expense in {}:", period);
            print!(
                "{}",
                format_expense_details(&expense, &settings.participants, symbol)
            );
        }

        ExpenseCommands::List {
            period,
            category,
            participant,
            search,
        } => {
            let period = resolve_period(period.as_deref())?;
            let filter = FilterSpec::from_choices(
                category.as_deref(),
                participant.as_deref(),
                search.as_deref(),
            )
            .map_err(BudgetError::Validation)?;

            let expenses = FilterEngine::apply(&service.list(&period)?, &filter);
            println!("Expenses for {}", period);
            if !filter.is_identity() {
                println!("{}", format_filter(&filter));
            }
            print!(
                "{}",
                format_expense_list(&expenses, &settings.participants, symbol)
            );
        }

        ExpenseCommands::Delete { id, period } => {
            let period = resolve_period(period.as_deref())?;
            let removed = service.delete_by_reference(&period, &id)?;
            println!(
                "Deleted expense {} ({} / {}).",
                removed.id, removed.category, removed.concept
            );
        }
    }

    Ok(())
}
