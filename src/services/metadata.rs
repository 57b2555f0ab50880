//! Metadata service
//!
//! Reads and merge-writes the per-period income and savings record.

use tracing::{debug, info};

use crate::error::{BudgetError, BudgetResult};
use crate::models::amount::round2;
use crate::models::{MetadataPatch, PeriodKey, PeriodMetadata};
use crate::reports::AggregationEngine;
use crate::storage::{BudgetStore, MetadataStore};

/// Goal presets offered as shortcuts, as percentages of total income
pub const GOAL_PRESETS: [u8; 3] = [10, 20, 30];

/// Service for the period metadata record
pub struct MetadataService<'a> {
    store: &'a dyn MetadataStore,
}

impl<'a> MetadataService<'a> {
    /// Create a new metadata service
    pub fn new(store: &'a dyn MetadataStore) -> Self {
        Self { store }
    }

    /// The period's record, writing the zero-valued one first if absent
    pub fn load_or_init(&self, period: &PeriodKey) -> BudgetResult<PeriodMetadata> {
        if let Some(existing) = self.store.read(period)? {
            return Ok(existing);
        }

        let zeroed = PeriodMetadata::zeroed();
        self.store.write(period, &MetadataPatch::full(&zeroed))?;
        info!(%period, "initialized period metadata");
        Ok(zeroed)
    }

    /// The period's record without initializing it
    pub fn get(&self, period: &PeriodKey) -> BudgetResult<PeriodMetadata> {
        Ok(self.store.read(period)?.unwrap_or_default())
    }

    /// Merge a partial update into the period's record
    pub fn update(&self, period: &PeriodKey, patch: &MetadataPatch) -> BudgetResult<PeriodMetadata> {
        if patch.is_empty() {
            return self.get(period);
        }
        self.store.write(period, patch)?;
        debug!(%period, ?patch, "metadata updated");
        self.get(period)
    }

    /// Set the savings goal to a percentage of total income
    pub fn apply_goal_preset(&self, period: &PeriodKey, percent: u8) -> BudgetResult<f64> {
        if !(1..=100).contains(&percent) {
            return Err(BudgetError::Validation(format!(
                "Goal percentage must be between 1 and 100 (got {})",
                percent
            )));
        }

        let meta = self.get(period)?.coerced();
        let total_income = meta.income_primary + meta.income_secondary;
        let goal = round2(total_income * f64::from(percent) / 100.0);

        self.store
            .write(period, &MetadataPatch::new().savings_goal(goal))?;
        info!(%period, percent, goal, "savings goal preset applied");
        Ok(goal)
    }
}

/// Write a period's final balance as the next period's carry-over
///
/// Needs both stores since the balance depends on the expenses.
pub fn carry_forward(store: &dyn BudgetStore, period: &PeriodKey) -> BudgetResult<f64> {
    let meta = store.read(period)?.unwrap_or_default();
    let expenses = store.list(period)?;
    let balance = AggregationEngine::compute(&meta, &expenses).final_balance;

    let next = period.next();
    store.write(&next, &MetadataPatch::new().carry_over(balance))?;
    info!(from = %period, to = %next, balance, "balance carried forward");
    Ok(balance)
}
