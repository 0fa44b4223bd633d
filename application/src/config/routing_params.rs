//! Routing parameters: router loop control and request limits.
//!
//! [`RoutingParams`] groups the static parameters shared by
//! [`ToolCallRouter`](crate::use_cases::route_tools::ToolCallRouter),
//! [`FallbackChatClient`](crate::use_cases::fallback_chat::FallbackChatClient)
//! and [`RoutedChatOrchestrator`](crate::use_cases::routed_chat::RoutedChatOrchestrator).

use pcai_domain::DEFAULT_TEMPERATURE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Router loop and request control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingParams {
    /// Execute proposed tool calls (otherwise they are only reported).
    pub execute_tools: bool,
    /// Hard cap on tool calls handled per router response.
    pub max_tool_calls: usize,
    /// Maximum characters kept from each tool result; 0 disables truncation.
    pub result_limit: usize,
    /// Timeout of each chat-completion call and outer bound of each tool call.
    pub timeout: Duration,
    /// Timeout of the router health probe.
    pub probe_timeout: Duration,
    /// Sampling temperature for every chat-completion call.
    pub temperature: f32,
    /// Check tool arguments against their schema before executing.
    pub validate_arguments: bool,
    /// Recognize `callTool(name, args)` in interactive replies.
    pub text_tool_calls: bool,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            execute_tools: true,
            max_tool_calls: 3,
            result_limit: 4000,
            timeout: Duration::from_secs(120),
            probe_timeout: Duration::from_secs(3),
            temperature: DEFAULT_TEMPERATURE,
            validate_arguments: true,
            text_tool_calls: false,
        }
    }
}

impl RoutingParams {
    // ==================== Builder Methods ====================

    pub fn with_execute_tools(mut self, execute: bool) -> Self {
        self.execute_tools = execute;
        self
    }

    pub fn with_max_tool_calls(mut self, max: usize) -> Self {
        self.max_tool_calls = max;
        self
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_validate_arguments(mut self, validate: bool) -> Self {
        self.validate_arguments = validate;
        self
    }

    pub fn with_text_tool_calls(mut self, enabled: bool) -> Self {
        self.text_tool_calls = enabled;
        self
    }
}
