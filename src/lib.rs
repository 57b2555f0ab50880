//! duo-budget - household budget tracking for two
//!
//! Each month (a *period*) has one income and savings record plus a log of
//! categorized expenses recorded by either participant. This library derives
//! totals, availability, savings progress and category breakdowns from them,
//! and keeps a dashboard view current as the stores change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `log`: Tracing subscriber setup
//! - `models`: Periods, participants, metadata records and expenses
//! - `storage`: Store traits with subscriptions, in-memory and JSON backends
//! - `reports`: Pure aggregation, filtering and distribution engines
//! - `services`: Write path, consolidation and the live dashboard
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export of a period
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use duo_budget::models::{PeriodKey, PeriodMetadata};
//! use duo_budget::reports::AggregationEngine;
//!
//! let totals = AggregationEngine::compute(&PeriodMetadata::default(), &[]);
//! assert_eq!(totals.total_expenses, 0.0);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod log;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
