//! Tool Executor port
//!
//! Defines the interface for executing tools by name.

use async_trait::async_trait;
use pcai_domain::{ToolDefinition, ToolError};
use serde_json::{Map, Value};

/// Port for tool execution
///
/// A name→handler table behind a single `execute` capability. Unknown names
/// fail with [`ToolError::not_found`], exactly like any other execution error.
/// Implementations are expected to bound each execution with a timeout.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Definitions of every tool offered to the router.
    fn tool_definitions(&self) -> &[ToolDefinition];

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_definitions().iter().any(|t| t.name() == name)
    }

    /// Parameter schema of a tool, if it is known.
    fn schema_for(&self, name: &str) -> Option<&Value> {
        self.tool_definitions()
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.parameters())
    }

    /// Execute a tool with already-parsed arguments.
    async fn execute(&self, name: &str, arguments: &Map<String, Value>) -> Result<Value, ToolError>;
}

/// Executor with no tools; every call is `NOT_FOUND`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTools;

#[async_trait]
impl ToolExecutorPort for NoTools {
    fn tool_definitions(&self) -> &[ToolDefinition] {
        &[]
    }

    async fn execute(&self, name: &str, _arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        Err(ToolError::not_found(name))
    }
}
