//! Infrastructure layer for pcai
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod prompts;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use prompts::FilePromptLoader;
pub use providers::OpenAiCompatibleGateway;
pub use tools::{CatalogError, CommandTool, FnTool, ToolCatalog, ToolHandler, ToolRegistry};
