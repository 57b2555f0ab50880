//! User settings for duo-budget
//!
//! Holds the budget identifier, currency symbol, participant display names and
//! the identity of whoever is using this machine.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::Participant;

/// Display names for the two participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantNames {
    pub primary: String,
    pub secondary: String,
}

impl Default for ParticipantNames {
    fn default() -> Self {
        Self {
            primary: "Primary".to_string(),
            secondary: "Secondary".to_string(),
        }
    }
}

impl ParticipantNames {
    /// Display name for a participant
    pub fn name_of(&self, participant: Participant) -> &str {
        match participant {
            Participant::Primary => &self.primary,
            Participant::Secondary => &self.secondary,
        }
    }
}

/// User settings for duo-budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Budget shared by both participants; partitions the data directory
    #[serde(default = "default_budget_id")]
    pub budget_id: String,

    /// Currency symbol appended to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default)]
    pub participants: ParticipantNames,

    /// Who is recording expenses from this machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_participant: Option<Participant>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_budget_id() -> String {
    "shared".to_string()
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            budget_id: default_budget_id(),
            currency_symbol: default_currency(),
            participants: ParticipantNames::default(),
            current_participant: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The identity required by the expense write path
    pub fn require_participant(&self) -> Result<Participant, BudgetError> {
        self.current_participant.ok_or_else(|| {
            BudgetError::Validation(
                "No participant selected; run 'duo whoami primary' or 'duo whoami secondary'"
                    .into(),
            )
        })
    }

    /// Display name of a participant
    pub fn participant_name(&self, participant: Participant) -> &str {
        self.participants.name_of(participant)
    }
}
