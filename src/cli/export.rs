//! CLI command for data export
//!
//! Writes one period to a file, or to stdout when no file is given.

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_expenses_csv, export_period_json, export_period_yaml, PeriodExport};
use crate::storage::JsonStore;

use super::resolve_period;

/// Export format options
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expenses only)
    Csv,
    /// JSON format (metadata, expenses and totals)
    #[default]
    Json,
    /// YAML format (same as JSON, human-readable)
    Yaml,
}

/// Options for `duo export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (stdout when omitted)
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[arg(short, long)]
    pub period: Option<String>,
}

/// Handle the export command
pub fn handle_export_command(
    store: &JsonStore,
    settings: &Settings,
    args: ExportArgs,
) -> BudgetResult<()> {
    let period = resolve_period(args.period.as_deref())?;
    let export = PeriodExport::from_store(store, store.budget_id(), &period)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(&export, settings, args.format, args.pretty, &mut writer)?;
            writer
                .flush()
                .map_err(|e| BudgetError::Export(e.to_string()))?;
            println!(
                "Exported {} ({} expenses) to: {}",
                period,
                export.expenses.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(&export, settings, args.format, args.pretty, &mut writer)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    export: &PeriodExport,
    settings: &Settings,
    format: ExportFormat,
    pretty: bool,
    writer: &mut W,
) -> BudgetResult<()> {
    match format {
        ExportFormat::Csv => export_expenses_csv(&export.expenses, &settings.participants, writer),
        ExportFormat::Json => export_period_json(export, writer, pretty),
        ExportFormat::Yaml => export_period_yaml(export, writer),
    }
}
