//! Domain layer for pcai
//!
//! This crate contains the entities, value objects and pure rules of the
//! tool-routing orchestrator. It has no dependencies on I/O or presentation.
//!
//! # Core Concepts
//!
//! ## Providers
//!
//! A provider is a named OpenAI-compatible chat-completions backend. Providers
//! form an ordered fallback chain; the [`ProviderHealthCache`] remembers which
//! were recently reachable.
//!
//! ## Router
//!
//! The router is a small model dedicated to choosing tools. Its tool calls are
//! validated by [`ToolParameterValidator`], executed, truncated and handed to
//! the primary model as context.

pub mod chat;
pub mod core;
pub mod provider;
pub mod routing;
pub mod tool;

// Re-export commonly used types
pub use chat::{ChatCompletion, ChatMessage, ChatRequest, Choice, DEFAULT_TEMPERATURE, Role};
pub use core::{
    clock::{Clock, ManualClock, SystemClock},
    error::DomainError,
};
pub use provider::{DEFAULT_HEALTH_TTL, Provider, ProviderHealthCache, endpoint_url};
pub use routing::{Mode, RoutedResponse, RouterOutcome};
pub use tool::{
    FunctionCall, FunctionSpec, ToolArguments, ToolCall, ToolDefinition, ToolError,
    ToolParameterValidator, ToolResult, ValidationReport, preview, truncate_result,
};
