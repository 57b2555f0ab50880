//! YAML export of one period

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::PeriodExport;
use std::io::Write;

/// Export a period to YAML with a short header comment
pub fn export_period_yaml<W: Write>(export: &PeriodExport, writer: &mut W) -> BudgetResult<()> {
    let header = format!(
        "# duo-budget export of {} ({})\n# Generated: {}\n# App Version: {}\n\n",
        export.period, export.budget_id, export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}
