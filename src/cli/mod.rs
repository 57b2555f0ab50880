//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analyze;
pub mod expense;
pub mod export;
pub mod meta;
pub mod settings;
pub mod summary;

pub use analyze::{handle_analyze_command, AnalyzeArgs};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use meta::{handle_meta_command, MetaCommands};
pub use settings::{handle_config_command, handle_init_command, handle_whoami_command, InitArgs};
pub use summary::{handle_carry_command, handle_consolidate_command, handle_summary_command};

use crate::error::{BudgetError, BudgetResult};
use crate::models::PeriodKey;

/// Resolve a `--period` value, defaulting to the current month
///
/// Accepts `YYYY-MM` as well as `current`, `last` and `next`.
pub fn resolve_period(arg: Option<&str>) -> BudgetResult<PeriodKey> {
    let Some(raw) = arg else {
        return Ok(PeriodKey::current());
    };

    match raw.trim().to_lowercase().as_str() {
        "" | "current" | "this" | "now" => Ok(PeriodKey::current()),
        "last" | "prev" | "previous" => Ok(PeriodKey::current().prev()),
        "next" => Ok(PeriodKey::current().next()),
        other => PeriodKey::parse(other).map_err(|e| BudgetError::Validation(e.to_string())),
    }
}
