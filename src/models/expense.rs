//! Expense model
//!
//! Expenses are append-only: created by an explicit action, deleted by an
//! explicit action, never edited in place. Each one belongs to exactly one
//! period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::{coerce, lenient};
use super::ids::ExpenseId;
use super::participant::Participant;

/// Normalize a free-text label (category or concept) to lowercase-trimmed
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTransaction {
    pub id: ExpenseId,

    /// Calendar date string; used for ordering and display only
    #[serde(default)]
    pub date: String,

    /// Normalized category label
    #[serde(default)]
    pub category: String,

    /// Normalized concept label (sub-group within the category)
    #[serde(default)]
    pub concept: String,

    #[serde(default, deserialize_with = "lenient")]
    pub amount: f64,

    pub participant: Participant,

    /// When the store accepted the expense
    pub created_at: DateTime<Utc>,
}

impl ExpenseTransaction {
    /// Build a stored expense from validated input
    pub fn from_valid(input: ValidExpense) -> Self {
        let ValidExpense(input) = input;
        Self {
            id: ExpenseId::new(),
            date: input.date,
            category: input.category,
            concept: input.concept,
            amount: input.amount,
            participant: input.participant,
            created_at: Utc::now(),
        }
    }

    /// Amount with non-finite values read as 0
    pub fn amount(&self) -> f64 {
        coerce(self.amount)
    }
}

impl fmt::Display for ExpenseTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} {:.2}",
            self.date,
            self.category,
            self.concept,
            self.amount()
        )
    }
}

/// Unvalidated input for a new expense
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: String,
    pub category: String,
    pub concept: String,
    pub amount: f64,
    pub participant: Participant,
}

impl NewExpense {
    pub fn new(
        category: impl Into<String>,
        concept: impl Into<String>,
        amount: f64,
        participant: Participant,
    ) -> Self {
        Self {
            date: String::new(),
            category: category.into(),
            concept: concept.into(),
            amount,
            participant,
        }
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Normalize labels and check the creation rules
    ///
    /// `default_date` fills in an empty date. Non-empty dates must be
    /// `YYYY-MM-DD`.
    pub fn validate(self, default_date: &str) -> Result<ValidExpense, ExpenseValidationError> {
        let concept = normalize_label(&self.concept);
        if concept.is_empty() {
            return Err(ExpenseValidationError::EmptyConcept);
        }

        let category = normalize_label(&self.category);
        if category.is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        let date = match self.date.trim() {
            "" => default_date.to_string(),
            d => {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|_| ExpenseValidationError::InvalidDate(d.to_string()))?;
                d.to_string()
            }
        };

        Ok(ValidExpense(NewExpense {
            date,
            category,
            concept,
            amount: self.amount,
            participant: self.participant,
        }))
    }
}

/// Expense input that passed validation and normalization
#[derive(Debug, Clone, PartialEq)]
pub struct ValidExpense(NewExpense);

impl ValidExpense {
    pub fn get(&self) -> &NewExpense {
        &self.0
    }
}

/// Reasons an expense is rejected before it reaches a store
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    EmptyConcept,
    EmptyCategory,
    NonPositiveAmount(f64),
    InvalidDate(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyConcept => write!(f, "Concept must not be empty"),
            Self::EmptyCategory => write!(f, "Category must not be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
            Self::InvalidDate(date) => write!(f, "Invalid date (expected YYYY-MM-DD): {}", date),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
