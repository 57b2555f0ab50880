//! JSON export of one period
//!
//! The export carries the raw metadata record and expense log alongside the
//! derived totals, so it can be read without recomputing anything.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseTransaction, PeriodKey, PeriodMetadata};
use crate::reports::{AggregationEngine, TotalsView};
use crate::storage::{BudgetStore, MetadataStore, TransactionStore};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything stored and derived for one period
#[derive(Debug, Clone, Serialize)]
pub struct PeriodExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub budget_id: String,
    pub period: PeriodKey,

    /// Stored record; zero-valued when the period has none
    pub metadata: PeriodMetadata,

    /// Expenses ordered by date
    pub expenses: Vec<ExpenseTransaction>,

    pub totals: TotalsView,
}

impl PeriodExport {
    /// Snapshot a period from a store
    pub fn from_store(
        store: &dyn BudgetStore,
        budget_id: &str,
        period: &PeriodKey,
    ) -> BudgetResult<Self> {
        let metadata = MetadataStore::read(store, period)?.unwrap_or_default();
        let expenses = TransactionStore::list(store, period)?;
        let totals = AggregationEngine::compute(&metadata, &expenses);

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            budget_id: budget_id.to_string(),
            period: *period,
            metadata,
            expenses,
            totals,
        })
    }
}

/// Export a period to JSON
pub fn export_period_json<W: Write>(
    export: &PeriodExport,
    writer: &mut W,
    pretty: bool,
) -> BudgetResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}
