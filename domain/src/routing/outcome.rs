//! Router outcome value object

use crate::tool::entities::{ToolCall, ToolResult};
use serde::{Deserialize, Serialize};

/// What the routing stage contributed to a request.
///
/// `router_available` and `degraded` let callers tell "no tool was relevant"
/// apart from "the router could not be used".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterOutcome {
    pub tool_calls: Vec<ToolCall>,
    pub tool_results: Vec<ToolResult>,
    pub router_available: bool,
    pub degraded: bool,
}

impl RouterOutcome {
    /// Outcome of a router that ran.
    pub fn routed(tool_calls: Vec<ToolCall>, tool_results: Vec<ToolResult>) -> Self {
        Self {
            tool_calls,
            tool_results,
            router_available: true,
            degraded: false,
        }
    }

    /// Empty outcome used when routing was skipped or failed.
    pub fn degraded() -> Self {
        Self {
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
            router_available: false,
            degraded: true,
        }
    }

    pub fn has_results(&self) -> bool {
        !self.tool_results.is_empty()
    }
}
