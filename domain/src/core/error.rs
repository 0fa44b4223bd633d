//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid mode: {0} (expected 'chat' or 'diagnose')")]
    InvalidMode(String),

    #[error("Invalid provider '{id}': {reason}")]
    InvalidProvider { id: String, reason: String },

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_display() {
        let error = DomainError::InvalidMode("triage".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid mode: triage (expected 'chat' or 'diagnose')"
        );
    }

    #[test]
    fn test_invalid_provider_display() {
        let error = DomainError::InvalidProvider {
            id: "local".to_string(),
            reason: "empty base_url".to_string(),
        };
        assert!(error.to_string().contains("'local'"));
        assert!(error.to_string().contains("empty base_url"));
    }
}
