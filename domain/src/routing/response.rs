//! Routed response entity

use super::mode::Mode;
use super::outcome::RouterOutcome;
use crate::tool::entities::{ToolCall, ToolResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Final result of one routed request. This is the public output contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedResponse {
    pub mode: Mode,
    pub prompt: String,
    pub tool_calls: Vec<ToolCall>,
    pub tool_results: Vec<ToolResult>,
    /// Narrative text exactly as returned by the provider
    pub response: String,
    /// Parsed answer, diagnose mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_json: Option<Value>,
    pub json_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_error: Option<String>,
    /// Id of the provider that produced `response`
    pub provider: String,
    pub model: String,
    pub router_available: bool,
    pub degraded: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl RoutedResponse {
    /// Assemble a response from its routing outcome and narrative answer.
    ///
    /// JSON fields start out unset; see [`RoutedResponse::with_json`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mode: Mode,
        prompt: impl Into<String>,
        outcome: RouterOutcome,
        response: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let elapsed_ms = (completed_at - started_at).num_milliseconds().max(0) as u64;
        Self {
            mode,
            prompt: prompt.into(),
            tool_calls: outcome.tool_calls,
            tool_results: outcome.tool_results,
            response: response.into(),
            response_json: None,
            json_valid: false,
            json_error: None,
            provider: provider.into(),
            model: model.into(),
            router_available: outcome.router_available,
            degraded: outcome.degraded,
            started_at,
            completed_at,
            elapsed_ms,
        }
    }

    /// Record the result of a JSON check of `response`.
    pub fn with_json(mut self, parsed: Result<Value, String>) -> Self {
        match parsed {
            Ok(value) => {
                self.response_json = Some(value);
                self.json_valid = true;
                self.json_error = None;
            }
            Err(e) => {
                self.response_json = None;
                self.json_valid = false;
                self.json_error = Some(e);
            }
        }
        self
    }
}
