//! Savings consolidation
//!
//! Moves the period's savings into the accumulated total and clears the
//! period's savings fields, as a single merge-write.

use serde::Serialize;
use tracing::info;

use crate::error::BudgetResult;
use crate::models::{MetadataPatch, PeriodKey, PeriodMetadata};
use crate::storage::MetadataStore;

/// Result of a consolidation attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConsolidationOutcome {
    Consolidated { amount: f64, new_accumulated: f64 },
    NothingToConsolidate,
}

/// The patch that consolidates a record, or `None` when there are no savings
pub fn plan_consolidation(metadata: &PeriodMetadata) -> Option<MetadataPatch> {
    let meta = metadata.coerced();
    let total_savings = meta.savings_target + meta.savings_extra;
    if total_savings <= 0.0 {
        return None;
    }

    Some(
        MetadataPatch::new()
            .savings_target(0.0)
            .savings_extra(0.0)
            .savings_accumulated(meta.savings_accumulated + total_savings),
    )
}

/// Service applying consolidation against a store
pub struct ConsolidationService<'a> {
    store: &'a dyn MetadataStore,
}

impl<'a> ConsolidationService<'a> {
    pub fn new(store: &'a dyn MetadataStore) -> Self {
        Self { store }
    }

    pub fn consolidate(&self, period: &PeriodKey) -> BudgetResult<ConsolidationOutcome> {
        let meta = self.store.read(period)?.unwrap_or_default();
        let Some(patch) = plan_consolidation(&meta) else {
            info!(%period, "nothing to consolidate");
            return Ok(ConsolidationOutcome::NothingToConsolidate);
        };

        let coerced = meta.coerced();
        let amount = coerced.savings_target + coerced.savings_extra;
        let new_accumulated = patch.savings_accumulated.unwrap_or(coerced.savings_accumulated);

        self.store.write(period, &patch)?;
        info!(%period, amount, new_accumulated, "savings consolidated");
        Ok(ConsolidationOutcome::Consolidated {
            amount,
            new_accumulated,
        })
    }
}
