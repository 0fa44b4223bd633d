//! Tool domain module
//!
//! Tools give the router model concrete diagnostic capabilities. A tool is
//! offered to the model as a [`ToolDefinition`], requested through a
//! [`ToolCall`] and reported back as a [`ToolResult`].
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolDefinition │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (catalog)      │    │ (from model) │    │ (to caller)  │
//! └────────────────┘    └──────┬───────┘    └──────────────┘
//!                              │
//!                              ├─ ToolArguments::normalize()
//!                              └─ ToolParameterValidator::validate()
//! ```
//!
//! Everything here is pure. Execution happens behind the application layer's
//! `ToolExecutorPort`, and failures surface as [`ToolError`].

pub mod entities;
pub mod truncation;
pub mod validation;
pub mod value_objects;

pub use entities::{FunctionCall, FunctionSpec, ToolArguments, ToolCall, ToolDefinition, ToolResult};
pub use truncation::{preview, truncate_result};
pub use validation::{ToolParameterValidator, ValidationReport};
pub use value_objects::ToolError;
