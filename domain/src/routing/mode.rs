//! Orchestrator modes.
//!
//! - Chat: free-form narrative answer
//! - Diagnose: the answer must be a JSON document (summary, findings,
//!   recommendations)

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Answer mode of a routed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Chat,
    Diagnose,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::Diagnose => "diagnose",
        }
    }

    /// Whether JSON output is enforced when the caller does not say otherwise.
    pub fn default_enforce_json(&self) -> bool {
        matches!(self, Mode::Diagnose)
    }

    /// Whether the final answer is checked for JSON at all.
    pub fn expects_json(&self) -> bool {
        matches!(self, Mode::Diagnose)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(Mode::Chat),
            "diagnose" | "diag" => Ok(Mode::Diagnose),
            other => Err(DomainError::InvalidMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!("chat".parse::<Mode>().unwrap(), Mode::Chat);
        assert_eq!("Diagnose".parse::<Mode>().unwrap(), Mode::Diagnose);
        assert!(matches!(
            "triage".parse::<Mode>(),
            Err(DomainError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_enforce_json_defaults() {
        assert!(Mode::Diagnose.default_enforce_json());
        assert!(!Mode::Chat.default_enforce_json());
        assert!(!Mode::Chat.expects_json());
    }
}
