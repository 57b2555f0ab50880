//! Period metadata
//!
//! One mutable record per period holding the income and savings figures.
//! Records are expected to exist only partially, so every field reads as 0
//! when it is missing or holds something that isn't a number.

use serde::{Deserialize, Serialize};

use super::amount::{coerce, lenient};

/// Income and savings figures for one period
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodMetadata {
    /// Income attributed to the primary participant
    #[serde(default, deserialize_with = "lenient")]
    pub income_primary: f64,

    /// Income attributed to the secondary participant
    #[serde(default, deserialize_with = "lenient")]
    pub income_secondary: f64,

    /// Surplus brought over from the previous period
    #[serde(default, deserialize_with = "lenient")]
    pub carry_over: f64,

    /// Amount deliberately set aside this period
    #[serde(default, deserialize_with = "lenient")]
    pub savings_target: f64,

    /// Additional ad-hoc savings this period
    #[serde(default, deserialize_with = "lenient")]
    pub savings_extra: f64,

    /// Target for `savings_target + savings_extra`; 0 means no goal
    #[serde(default, deserialize_with = "lenient")]
    pub savings_goal: f64,

    /// Running total across all periods, informational only
    #[serde(default, deserialize_with = "lenient")]
    pub savings_accumulated: f64,
}

impl PeriodMetadata {
    /// The zero-valued record written when a period has none yet
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Copy with every non-finite field replaced by 0
    pub fn coerced(&self) -> Self {
        Self {
            income_primary: coerce(self.income_primary),
            income_secondary: coerce(self.income_secondary),
            carry_over: coerce(self.carry_over),
            savings_target: coerce(self.savings_target),
            savings_extra: coerce(self.savings_extra),
            savings_goal: coerce(self.savings_goal),
            savings_accumulated: coerce(self.savings_accumulated),
        }
    }

    /// Apply a partial record; untouched fields keep their value
    pub fn merge(&mut self, patch: &MetadataPatch) {
        let fields = [
            (&mut self.income_primary, patch.income_primary),
            (&mut self.income_secondary, patch.income_secondary),
            (&mut self.carry_over, patch.carry_over),
            (&mut self.savings_target, patch.savings_target),
            (&mut self.savings_extra, patch.savings_extra),
            (&mut self.savings_goal, patch.savings_goal),
            (&mut self.savings_accumulated, patch.savings_accumulated),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }

    /// Copy of `self` with `patch` merged in
    pub fn merged(&self, patch: &MetadataPatch) -> Self {
        let mut next = *self;
        next.merge(patch);
        next
    }
}

/// Partial metadata record for merge-writes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetadataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_primary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_secondary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carry_over: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_extra: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_accumulated: Option<f64>,
}

impl MetadataPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that overwrites every field with the given record
    pub fn full(metadata: &PeriodMetadata) -> Self {
        Self {
            income_primary: Some(metadata.income_primary),
            income_secondary: Some(metadata.income_secondary),
            carry_over: Some(metadata.carry_over),
            savings_target: Some(metadata.savings_target),
            savings_extra: Some(metadata.savings_extra),
            savings_goal: Some(metadata.savings_goal),
            savings_accumulated: Some(metadata.savings_accumulated),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn income_primary(mut self, value: f64) -> Self {
        self.income_primary = Some(value);
        self
    }

    pub fn income_secondary(mut self, value: f64) -> Self {
        self.income_secondary = Some(value);
        self
    }

    pub fn carry_over(mut self, value: f64) -> Self {
        self.carry_over = Some(value);
        self
    }

    pub fn savings_target(mut self, value: f64) -> Self {
        self.savings_target = Some(value);
        self
    }

    pub fn savings_extra(mut self, value: f64) -> Self {
        self.savings_extra = Some(value);
        self
    }

    pub fn savings_goal(mut self, value: f64) -> Self {
        self.savings_goal = Some(value);
        self
    }

    pub fn savings_accumulated(mut self, value: f64) -> Self {
        self.savings_accumulated = Some(value);
        self
    }
}
