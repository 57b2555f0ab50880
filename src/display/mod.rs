//! Display formatting for terminal output
//!
//! Turns reports and records into strings for the command line. Amounts are
//! rounded to two decimals here and nowhere earlier.

pub mod analytics;
pub mod expense;
pub mod report;
pub mod summary;

pub use analytics::{format_distribution, format_filter};
pub use expense::{format_expense_details, format_expense_list};
pub use summary::{format_category_tree, format_goal, format_summary};
