//! Port definitions (interfaces for external systems)
//!
//! Ports define the boundaries between the application layer and the outside
//! world. Adapters in the infrastructure layer implement these.

pub mod health_probe;
pub mod llm_gateway;
pub mod system_prompt;
pub mod tool_executor;
