//! The two fixed household participants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of exactly two household members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    Primary,
    Secondary,
}

impl Participant {
    pub const ALL: [Participant; 2] = [Participant::Primary, Participant::Secondary];

    /// Stable lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Participant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" | "p1" | "1" => Ok(Self::Primary),
            "secondary" | "p2" | "2" => Ok(Self::Secondary),
            other => Err(format!(
                "Unknown participant '{}': expected 'primary' or 'secondary'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Primary".parse::<Participant>(), Ok(Participant::Primary));
        assert_eq!(" p2 ".parse::<Participant>(), Ok(Participant::Secondary));
        assert!("both".parse::<Participant>().is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Participant::Secondary).unwrap();
        assert_eq!(json, "\"secondary\"");
    }
}
