//! Configuration module for duo-budget
//!
//! - Path resolution for settings and period data
//! - User settings persistence, including the current participant identity

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::{ParticipantNames, Settings};
