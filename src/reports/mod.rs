//! Derived views
//!
//! Pure computations over a period's snapshots:
//! - Totals: income, savings, availability, balances and category groupings
//! - Analytics: filtered expense lists and the per-category distribution

pub mod analytics;
pub mod totals;

pub use analytics::{CategoryShare, Distribution, FilterEngine, FilterSpec, Selection};
pub use totals::{AggregationEngine, CategoryGroup, ConceptGroup, GoalProgress, TotalsView};
