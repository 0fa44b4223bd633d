//! Tool Registry
//!
//! The [`ToolRegistry`] maps tool names to [`ToolHandler`]s and implements
//! [`ToolExecutorPort`]. Every execution is bounded by a per-call timeout.
//!
//! # Usage
//!
//! ```ignore
//! use pcai_infrastructure::tools::{CommandTool, ToolCatalog, ToolRegistry};
//!
//! let registry = ToolRegistry::new(ToolCatalog::load(path)?)
//!     .with_timeout(Duration::from_secs(30))
//!     .register("pcai_get_usb", CommandTool::new("pwsh", ["-File", "Get-Usb.ps1"]));
//! ```
//!
//! Catalog entries without a handler are still offered to the router; calling
//! them fails with `NOT_FOUND` like any unknown name.

use async_trait::async_trait;
use pcai_application::ports::tool_executor::ToolExecutorPort;
use pcai_domain::{ToolDefinition, ToolError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default per-call tool timeout.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(60);

/// A single named capability.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError>;
}

/// Handler backed by a synchronous closure.
pub struct FnTool<F>(F);

impl<F> FnTool<F>
where
    F: Fn(&Map<String, Value>) -> Result<Value, ToolError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> ToolHandler for FnTool<F>
where
    F: Fn(&Map<String, Value>) -> Result<Value, ToolError> + Send + Sync,
{
    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        (self.0)(arguments)
    }
}

/// Name→handler table implementing [`ToolExecutorPort`].
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    timeout: Duration,
}

impl ToolRegistry {
    pub fn new(definitions: Vec<ToolDefinition>) -> Self {
        Self {
            definitions,
            handlers: HashMap::new(),
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bind `handler` to `name`, replacing any earlier binding.
    pub fn register(mut self, name: impl Into<String>, handler: impl ToolHandler + 'static) -> Self {
        self.handlers.insert(name.into(), Arc::new(handler));
        self
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Catalog tools that have no handler bound.
    pub fn unbound_tools(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .map(|d| d.name())
            .filter(|name| !self.handlers.contains_key(*name))
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    async fn execute(&self, name: &str, arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ToolError::not_found(name))?;
        debug!(tool = name, "Executing tool");
        tokio::time::timeout(self.timeout, handler.call(arguments))
            .await
            .map_err(|_| ToolError::timeout(name))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct SlowTool;

    #[async_trait]
    impl ToolHandler for SlowTool {
        async fn call(&self, _arguments: &Map<String, Value>) -> Result<Value, ToolError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Value::Null)
        }
    }

    fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::function("echo", "Echo arguments", json!({})),
            ToolDefinition::function("pcai_get_usb", "USB devices", json!({})),
        ]
    }

    #[tokio::test]
    async fn test_execute_registered_handler() {
        let registry = ToolRegistry::new(definitions())
            .register("echo", FnTool::new(|args| Ok(Value::Object(args.clone()))));

        let args = json!({"x": 1}).as_object().cloned().unwrap();
        let value = registry.execute("echo", &args).await.unwrap();
        assert_eq!(value, json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_found() {
        let registry = ToolRegistry::new(definitions());
        let err = registry.execute("pcai_get_usb", &Map::new()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(registry.unbound_tools(), vec!["echo", "pcai_get_usb"]);
    }

    #[tokio::test]
    async fn test_slow_handler_times_out() {
        let registry = ToolRegistry::new(definitions())
            .with_timeout(Duration::from_millis(20))
            .register("pcai_get_usb", SlowTool);

        let err = registry.execute("pcai_get_usb", &Map::new()).await.unwrap_err();
        assert_eq!(err.code, "TIMEOUT");
    }

    #[test]
    fn test_definitions_are_exposed() {
        let registry = ToolRegistry::new(definitions());
        assert!(registry.has_tool("echo"));
        assert!(!registry.has_handler("echo"));
        assert!(registry.schema_for("pcai_get_usb").is_some());
    }
}
