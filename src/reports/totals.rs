//! Period totals
//!
//! [`AggregationEngine`] derives every figure the dashboard shows from one
//! metadata record and the period's expenses. It holds no state, performs no
//! I/O and never mutates its inputs; identical inputs give identical output.
//! Non-finite numbers are read as 0 and nothing is rounded here.

use serde::Serialize;

use crate::models::{ExpenseTransaction, PeriodMetadata};

/// Progress towards the period's savings goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "percent", rename_all = "snake_case")]
pub enum GoalProgress {
    /// No goal set (goal is 0 or negative)
    NoGoal,
    /// Percentage of a real goal, within `[0, 100]`
    Percent(f64),
}

impl GoalProgress {
    /// Progress against a goal
    pub fn measure(saved: f64, goal: f64) -> Self {
        if goal > 0.0 {
            Self::Percent((saved / goal * 100.0).clamp(0.0, 100.0))
        } else {
            Self::NoGoal
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Self::NoGoal => None,
            Self::Percent(p) => Some(*p),
        }
    }

    pub fn has_goal(&self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

/// Expenses sharing a concept within a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptGroup {
    pub concept: String,
    pub expenses: Vec<ExpenseTransaction>,
}

impl ConceptGroup {
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount()).sum()
    }
}

/// Expenses of one category, sub-grouped by concept
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub total: f64,
    /// Concepts in first-appearance order
    pub by_concept: Vec<ConceptGroup>,
}

impl CategoryGroup {
    pub fn concept(&self, concept: &str) -> Option<&ConceptGroup> {
        self.by_concept.iter().find(|c| c.concept == concept)
    }

    pub fn expense_count(&self) -> usize {
        self.by_concept.iter().map(|c| c.expenses.len()).sum()
    }
}

/// Everything derived from a period's metadata and expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsView {
    pub total_income: f64,
    pub total_savings_this_period: f64,
    pub available_to_spend: f64,
    pub total_expenses: f64,
    pub final_balance: f64,
    pub savings_goal: f64,
    pub savings_progress: GoalProgress,
    pub savings_accumulated: f64,
    pub carry_over: f64,
    /// Categories in first-appearance order
    pub by_category: Vec<CategoryGroup>,
}

impl TotalsView {
    pub fn category(&self, category: &str) -> Option<&CategoryGroup> {
        self.by_category.iter().find(|c| c.category == category)
    }

    /// Flat progress number; 0 when no goal is set
    pub fn savings_progress_percent(&self) -> f64 {
        self.savings_progress.percent().unwrap_or(0.0)
    }

    /// Savings set aside exceed what came in this period
    pub fn savings_exceed_income(&self) -> bool {
        self.total_savings_this_period > self.total_income
    }

    pub fn balance_with_carry_over(&self) -> f64 {
        self.final_balance + self.carry_over
    }
}

/// Stateless calculator for [`TotalsView`]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn compute(metadata: &PeriodMetadata, expenses: &[ExpenseTransaction]) -> TotalsView {
        let meta = metadata.coerced();

        let total_income = meta.income_primary + meta.income_secondary;
        let total_savings_this_period = meta.savings_target + meta.savings_extra;
        let available_to_spend = total_income - total_savings_this_period;

        let by_category = group_by_category(expenses);
        let total_expenses: f64 = expenses.iter().map(|e| e.amount()).sum();

        TotalsView {
            total_income,
            total_savings_this_period,
            available_to_spend,
            total_expenses,
            final_balance: available_to_spend - total_expenses,
            savings_goal: meta.savings_goal,
            savings_progress: GoalProgress::measure(total_savings_this_period, meta.savings_goal),
            savings_accumulated: meta.savings_accumulated,
            carry_over: meta.carry_over,
            by_category,
        }
    }
}

/// Partition expenses by exact category, then by exact concept
fn group_by_category(expenses: &[ExpenseTransaction]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for expense in expenses {
        let index = match groups.iter().position(|g| g.category == expense.category) {
            Some(index) => index,
            None => {
                groups.push(CategoryGroup {
                    category: expense.category.clone(),
                    total: 0.0,
                    by_concept: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.total += expense.amount();

        match group
            .by_concept
            .iter()
            .position(|c| c.concept == expense.concept)
        {
            Some(i) => group.by_concept[i].expenses.push(expense.clone()),
            None => group.by_concept.push(ConceptGroup {
                concept: expense.concept.clone(),
                expenses: vec![expense.clone()],
            }),
        }
    }

    groups
}
