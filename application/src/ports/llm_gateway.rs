//! LLM Gateway port
//!
//! Defines the interface for calling OpenAI-compatible chat-completion
//! providers.

use async_trait::async_trait;
use pcai_domain::{ChatCompletion, ChatRequest, Provider};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for chat-completion calls
///
/// One call per request; retries, if any, belong to the transport.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `request` to `provider` and wait at most `timeout` for the reply.
    async fn chat_completion(
        &self,
        provider: &Provider,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<ChatCompletion, GatewayError>;
}
