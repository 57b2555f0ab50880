//! Period summary formatting
//!
//! Renders the totals of a period: income, savings, availability, balance,
//! savings goal progress and the category/concept breakdown. All rounding to
//! two decimals happens here.

use crate::config::ParticipantNames;
use crate::models::amount::format_amount;
use crate::models::{PeriodKey, PeriodMetadata};
use crate::reports::{GoalProgress, TotalsView};

use super::report::{double_separator, format_bar, format_percentage, labeled, separator};

const WIDTH: usize = 44;

/// Shown instead of a progress bar when the period has no goal
pub const NO_GOAL_MESSAGE: &str = "No savings goal set";

/// Shown when the period's savings exceed its income
pub const SAVINGS_WARNING: &str = "Warning: savings for this period exceed total income";

/// Format the full summary of a period
pub fn format_summary(
    period: &PeriodKey,
    metadata: &PeriodMetadata,
    totals: &TotalsView,
    names: &ParticipantNames,
    symbol: &str,
) -> String {
    let meta = metadata.coerced();
    let money = |v: f64| format_amount(v, symbol);
    let mut lines = vec![format!("Budget {}", period), double_separator(WIDTH)];

    lines.push("Income".to_string());
    lines.push(labeled(
        &format!("  {}", names.primary),
        &money(meta.income_primary),
        WIDTH,
    ));
    lines.push(labeled(
        &format!("  {}", names.secondary),
        &money(meta.income_secondary),
        WIDTH,
    ));
    lines.push(labeled("  Total", &money(totals.total_income), WIDTH));
    lines.push(String::new());

    lines.push("Savings this period".to_string());
    lines.push(labeled("  Target", &money(meta.savings_target), WIDTH));
    lines.push(labeled("  Extra", &money(meta.savings_extra), WIDTH));
    lines.push(labeled(
        "  Total",
        &money(totals.total_savings_this_period),
        WIDTH,
    ));
    lines.push(separator(WIDTH));

    lines.push(labeled(
        "Available to spend",
        &money(totals.available_to_spend),
        WIDTH,
    ));
    lines.push(labeled("Expenses", &money(totals.total_expenses), WIDTH));
    lines.push(labeled("Final balance", &money(totals.final_balance), WIDTH));
    if totals.carry_over != 0.0 {
        lines.push(labeled("Carried over", &money(totals.carry_over), WIDTH));
        lines.push(labeled(
            "Balance with carry-over",
            &money(totals.balance_with_carry_over()),
            WIDTH,
        ));
    }
    lines.push(String::new());

    lines.push(format_goal(totals, symbol));
    lines.push(labeled(
        "Accumulated savings",
        &money(totals.savings_accumulated),
        WIDTH,
    ));

    if totals.savings_exceed_income() {
        lines.push(String::new());
        lines.push(SAVINGS_WARNING.to_string());
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Savings goal line with a progress bar, or the no-goal message
pub fn format_goal(totals: &TotalsView, symbol: &str) -> String {
    match totals.savings_progress {
        GoalProgress::NoGoal => NO_GOAL_MESSAGE.to_string(),
        GoalProgress::Percent(pct) => format!(
            "Savings goal {} [{}] {}",
            format_amount(totals.savings_goal, symbol),
            format_bar(pct, 100.0, 20),
            format_percentage(pct)
        ),
    }
}

/// Format spending as a category tree with concepts underneath
pub fn format_category_tree(totals: &TotalsView, symbol: &str) -> String {
    if totals.by_category.is_empty() {
        return "No expenses recorded for this period.\n".to_string();
    }

    let mut output = String::new();
    for group in &totals.by_category {
        output.push_str(&labeled(
            &group.category,
            &format_amount(group.total, symbol),
            WIDTH,
        ));
        output.push('\n');

        for (i, concept) in group.by_concept.iter().enumerate() {
            let prefix = if i == group.by_concept.len() - 1 {
                "└── "
            } else {
                "├── "
            };
            let label = format!("  {}{} ({})", prefix, concept.concept, concept.expenses.len());
            output.push_str(&labeled(&label, &format_amount(concept.total(), symbol), WIDTH));
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, ExpenseTransaction, Participant};
    use crate::reports::AggregationEngine;
    use chrono::Utc;

    fn expense(category: &str, concept: &str, amount: f64) -> ExpenseTransaction {
        ExpenseTransaction {
            id: ExpenseId::new(),
            date: "2026-01-05".to_string(),
            category: category.to_string(),
            concept: concept.to_string(),
            amount,
            participant: Participant::Primary,
            created_at: Utc::now(),
        }
    }

    fn names() -> ParticipantNames {
        ParticipantNames {
            primary: "Ana".to_string(),
            secondary: "Luis".to_string(),
        }
    }

    fn jan() -> PeriodKey {
        PeriodKey::new(2026, 1).unwrap()
    }

    #[test]
    fn test_summary_figures() {
        let meta = PeriodMetadata {
            income_primary: 2000.0,
            income_secondary: 1500.0,
            savings_target: 300.0,
            savings_goal: 500.0,
            ..PeriodMetadata::default()
        };
        let expenses = vec![
            expense("comida", "supermercado", 50.0),
            expense("ocio", "cervezas", 20.0),
            expense("comida", "supermercado", 30.0),
        ];
        let totals = AggregationEngine::compute(&meta, &expenses);

        let output = format_summary(&jan(), &meta, &totals, &names(), "€");
        assert!(output.contains("Budget 2026-01"));
        assert!(output.contains("Ana"));
        assert!(output.contains("3500.00 €"));
        assert!(output.contains("3200.00 €"));
        assert!(output.contains("3100.00 €"));
        assert!(output.contains("60%"));
        assert!(!output.contains(SAVINGS_WARNING));
        assert!(!output.contains("Carried over"));
    }

    #[test]
    fn test_summary_without_goal_and_with_warning() {
        let meta = PeriodMetadata {
            income_primary: 100.0,
            savings_target: 150.0,
            carry_over: 20.0,
            ..PeriodMetadata::default()
        };
        let totals = AggregationEngine::compute(&meta, &[]);

        let output = format_summary(&jan(), &meta, &totals, &names(), "€");
        assert!(output.contains(NO_GOAL_MESSAGE));
        assert!(output.contains(SAVINGS_WARNING));
        assert!(output.contains("-50.00 €"));
        assert!(output.contains("Balance with carry-over"));
        assert!(output.contains("-30.00 €"));
    }

    #[test]
    fn test_category_tree() {
        let expenses = vec![
            expense("comida", "supermercado", 50.0),
            expense("comida", "pan", 2.5),
            expense("ocio", "cervezas", 20.0),
        ];
        let totals = AggregationEngine::compute(&PeriodMetadata::default(), &expenses);

        let output = format_category_tree(&totals, "€");
        assert!(output.contains("comida"));
        assert!(output.contains("52.50 €"));
        assert!(output.contains("├── supermercado (1)"));
        assert!(output.contains("└── pan (1)"));
        assert!(output.find("comida").unwrap() < output.find("ocio").unwrap());
    }

    #[test]
    fn test_empty_category_tree() {
        let totals = AggregationEngine::compute(&PeriodMetadata::default(), &[]);
        assert!(format_category_tree(&totals, "€").contains("No expenses"));
    }
}
