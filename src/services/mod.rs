//! Service layer for duo-budget
//!
//! The service layer sits between the command surface and the stores,
//! handling validation, merge-writes and the dashboard's live state.

pub mod consolidation;
pub mod dashboard;
pub mod expense;
pub mod metadata;

pub use consolidation::{plan_consolidation, ConsolidationOutcome, ConsolidationService};
pub use dashboard::{Dashboard, DashboardState, DashboardView};
pub use expense::ExpenseService;
pub use metadata::{carry_forward, MetadataService, GOAL_PRESETS};
