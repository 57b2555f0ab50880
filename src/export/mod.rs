//! Export module for duo-budget
//!
//! Exports a single period in multiple formats:
//! - CSV: the expense log (spreadsheet-compatible)
//! - JSON: metadata, expenses and totals, machine-readable
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_period_json, PeriodExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_period_yaml;
