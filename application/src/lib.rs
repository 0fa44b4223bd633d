//! Application layer for pcai
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::RoutingParams;
pub use ports::{
    health_probe::HealthProbe,
    llm_gateway::{GatewayError, LlmGateway},
    system_prompt::{BuiltinPrompts, SystemPromptPort},
    tool_executor::{NoTools, ToolExecutorPort},
};
pub use use_cases::chat_session::{ChatSession, ChatTurn};
pub use use_cases::fallback_chat::{ChatOptions, FallbackChatClient, FallbackError, FallbackReply};
pub use use_cases::route_tools::{RouteToolsInput, RouterError, RouterRun, ToolCallRouter};
pub use use_cases::routed_chat::{
    DEFAULT_ROUTER_MODEL, DEFAULT_ROUTER_URL, RoutedChatError, RoutedChatOrchestrator,
    RoutedChatRequest,
};
