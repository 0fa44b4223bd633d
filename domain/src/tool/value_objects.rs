//! Tool domain value objects
//!
//! [`ToolError`] is the single failure type of the tool execution boundary.
//! The router never propagates it: every error is embedded in the result text
//! of the call that produced it.

use serde::{Deserialize, Serialize};

/// Error raised while executing a tool.
///
/// | Code | Meaning |
/// |------|---------|
/// | `NOT_FOUND` | No handler is registered under the requested name |
/// | `INVALID_ARGUMENT` | The handler rejected its arguments |
/// | `EXECUTION_FAILED` | The handler ran and failed |
/// | `TIMEOUT` | The handler did not finish within its time limit |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn not_found(tool: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("Tool not found: {}", tool.into()))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(tool: impl Into<String>) -> Self {
        Self::new("TIMEOUT", format!("Tool timed out: {}", tool.into()))
    }

    pub fn is_not_found(&self) -> bool {
        self.code == "NOT_FOUND"
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error() {
        let err = ToolError::not_found("pcai_get_usb").with_details("no handler registered");

        assert_eq!(err.code, "NOT_FOUND");
        assert!(err.is_not_found());
        assert!(err.message.contains("pcai_get_usb"));
        assert_eq!(
            err.to_string(),
            "[NOT_FOUND] Tool not found: pcai_get_usb (no handler registered)"
        );
    }

    #[test]
    fn test_timeout_message() {
        let err = ToolError::timeout("pcai_get_network");
        assert_eq!(err.code, "TIMEOUT");
        assert!(!err.is_not_found());
        assert_eq!(err.message, "Tool timed out: pcai_get_network");
    }
}
