//! Expense display formatting
//!
//! Expense lists are rendered as tables; single expenses as a detail block.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::ParticipantNames;
use crate::models::amount::format_amount;
use crate::models::ExpenseTransaction;

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Concept")]
    concept: String,
    #[tabled(rename = "Who")]
    who: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of expenses as a table
pub fn format_expense_list(
    expenses: &[ExpenseTransaction],
    names: &ParticipantNames,
    symbol: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.clone(),
        category: truncate(&e.category, 20),
        concept: truncate(&e.concept, 24),
        who: names.name_of(e.participant).to_string(),
        amount: format_amount(e.amount(), symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(5)).with(Alignment::right()));

    let total: f64 = expenses.iter().map(|e| e.amount()).sum();
    format!(
        "{}\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        format_amount(total, symbol)
    )
}

/// Format one expense for confirmation output
pub fn format_expense_details(
    expense: &ExpenseTransaction,
    names: &ParticipantNames,
    symbol: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Date:     {}\n", expense.date));
    output.push_str(&format!("Category: {}\n", expense.category));
    output.push_str(&format!("Concept:  {}\n", expense.concept));
    output.push_str(&format!(
        "Amount:   {}\n",
        format_amount(expense.amount(), symbol)
    ));
    output.push_str(&format!(
        "Paid by:  {}\n",
        names.name_of(expense.participant)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Participant};
    use chrono::Utc;

    fn expense(concept: &str, amount: f64, participant: Participant) -> ExpenseTransaction {
        ExpenseTransaction {
            id: ExpenseId::new(),
            date: "2026-01-05".to_string(),
            category: "comida".to_string(),
            concept: concept.to_string(),
            amount,
            participant,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_list() {
        let output = format_expense_list(&[], &ParticipantNames::default(), "€");
        assert!(output.contains("No expenses found"));
    }

    #[test]
    fn test_list_shows_rows_and_total() {
        let expenses = vec![
            expense("supermercado", 50.0, Participant::Primary),
            expense("pan", 2.5, Participant::Secondary),
        ];
        let names = ParticipantNames {
            primary: "Ana".to_string(),
            secondary: "Luis".to_string(),
        };

        let output = format_expense_list(&expenses, &names, "€");
        assert!(output.contains("Concept"));
        assert!(output.contains("supermercado"));
        assert!(output.contains("Luis"));
        assert!(output.contains(&expenses[0].id.to_string()));
        assert!(output.contains("2 expense(s), total 52.50 €"));
    }

    #[test]
    fn test_details() {
        let e = expense("pan", 2.5, Participant::Primary);
        let output = format_expense_details(&e, &ParticipantNames::default(), "");
        assert!(output.contains("Concept:  pan"));
        assert!(output.contains("Amount:   2.50\n"));
        assert!(output.contains("Paid by:  Primary"));
    }
}
