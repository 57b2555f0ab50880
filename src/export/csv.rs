//! CSV export of a period's expenses
//!
//! One row per expense, spreadsheet-compatible. Amounts are written with two
//! decimals.

use serde::Serialize;
use std::io::Write;

use crate::config::ParticipantNames;
use crate::error::{BudgetError, BudgetResult};
use crate::models::ExpenseTransaction;

#[derive(Serialize)]
struct ExpenseRecord<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Concept")]
    concept: &'a str,
    #[serde(rename = "Participant")]
    participant: &'a str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Export expenses to CSV
pub fn export_expenses_csv<W: Write>(
    expenses: &[ExpenseTransaction],
    names: &ParticipantNames,
    writer: &mut W,
) -> BudgetResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if expenses.is_empty() {
        // serialize() only emits headers alongside the first row
        csv_writer
            .write_record([
                "ID",
                "Date",
                "Category",
                "Concept",
                "Participant",
                "Name",
                "Amount",
            ])
            .map_err(export_error)?;
    }

    for expense in expenses {
        csv_writer
            .serialize(ExpenseRecord {
                id: expense.id.as_uuid().to_string(),
                date: &expense.date,
                category: &expense.category,
                concept: &expense.concept,
                participant: expense.participant.as_str(),
                name: names.name_of(expense.participant),
                amount: format!("{:.2}", expense.amount()),
            })
            .map_err(export_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

fn export_error(e: csv::Error) -> BudgetError {
    BudgetError::Export(e.to_string())
}
