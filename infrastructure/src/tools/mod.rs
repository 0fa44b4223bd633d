//! Tool adapters
//!
//! - [`ToolCatalog`]: read-only JSON catalog of tool definitions
//! - [`ToolRegistry`]: name→handler table implementing `ToolExecutorPort`
//! - [`CommandTool`]: handler running an external program

pub mod catalog;
pub mod command;
pub mod registry;

pub use catalog::{CatalogError, DEFAULT_CATALOG_PATH, ToolCatalog};
pub use command::CommandTool;
pub use registry::{DEFAULT_TOOL_TIMEOUT, FnTool, ToolHandler, ToolRegistry};
