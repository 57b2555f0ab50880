//! Core data models for duo-budget
//!
//! Periods, participants, the per-period metadata record and the expense log.

pub mod amount;
pub mod category;
pub mod expense;
pub mod ids;
pub mod metadata;
pub mod participant;
pub mod period;

pub use category::color_for_category;
pub use expense::{
    normalize_label, ExpenseTransaction, ExpenseValidationError, NewExpense, ValidExpense,
};
pub use ids::ExpenseId;
pub use metadata::{MetadataPatch, PeriodMetadata};
pub use participant::Participant;
pub use period::{PeriodKey, PeriodParseError};
