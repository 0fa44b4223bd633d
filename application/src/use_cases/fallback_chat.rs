//! Fallback chat use case.
//!
//! Dispatches one chat completion over an ordered provider chain. Providers
//! the [`ProviderHealthCache`] knows to be unhealthy are skipped without a
//! network call; the first provider that answers wins.
//!
//! There are no per-provider retries here. A provider that fails is marked
//! unhealthy and the next one is tried.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use pcai_domain::{ChatMessage, ChatRequest, DEFAULT_TEMPERATURE, Provider, ProviderHealthCache};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during fallback dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FallbackError {
    /// Every provider was skipped or failed.
    #[error("No provider available (attempted: [{}], skipped: [{}]): {last_error}", .attempted.join(", "), .skipped.join(", "))]
    ProviderUnavailable {
        attempted: Vec<String>,
        skipped: Vec<String>,
        last_error: String,
    },
}

/// Per-call options for [`FallbackChatClient::chat`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    /// Model override applied to every provider; `None` uses each provider's own model.
    pub model: Option<String>,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(120),
        }
    }
}

impl ChatOptions {
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Successful reply from one provider of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackReply {
    pub provider: Provider,
    pub message: ChatMessage,
    /// Model reported by the provider, or the requested one
    pub model: String,
}

/// Ordered multi-provider chat-completion dispatch.
#[derive(Clone)]
pub struct FallbackChatClient {
    gateway: Arc<dyn LlmGateway>,
    health: Arc<ProviderHealthCache>,
}

impl FallbackChatClient {
    pub fn new(gateway: Arc<dyn LlmGateway>, health: Arc<ProviderHealthCache>) -> Self {
        Self { gateway, health }
    }

    pub fn health(&self) -> &Arc<ProviderHealthCache> {
        &self.health
    }

    /// Send `messages` to the first provider of `providers` that answers.
    pub async fn chat(
        &self,
        providers: &[Provider],
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<FallbackReply, FallbackError> {
        let mut attempted = Vec::new();
        let mut skipped = Vec::new();
        let mut last_error = None;

        for provider in providers {
            if self.health.is_known_unhealthy(&provider.id) {
                debug!(provider = %provider.id, "Skipping provider cached as unhealthy");
                skipped.push(provider.id.clone());
                continue;
            }
            attempted.push(provider.id.clone());

            let model = options
                .model
                .clone()
                .unwrap_or_else(|| provider.model_name.clone());
            let request = ChatRequest::new(model.clone(), messages.to_vec())
                .with_temperature(options.temperature);

            let outcome = match tokio::time::timeout(
                options.timeout,
                self.gateway.chat_completion(provider, &request, options.timeout),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout(options.timeout)),
            };

            let failure = match outcome {
                Ok(completion) => {
                    let reported_model = completion.model.clone();
                    match completion.into_first_message() {
                        Some(message) => {
                            self.health.set(&provider.id, true);
                            info!(provider = %provider.id, model = %model, "Provider answered");
                            return Ok(FallbackReply {
                                provider: provider.clone(),
                                message,
                                model: reported_model.unwrap_or(model),
                            });
                        }
                        None => "response contained no choices".to_string(),
                    }
                }
                Err(e) => e.to_string(),
            };

            warn!(provider = %provider.id, error = %failure, "Provider failed, trying next");
            self.health.set(&provider.id, false);
            last_error = Some(failure);
        }

        Err(FallbackError::ProviderUnavailable {
            attempted,
            skipped,
            last_error: last_error
                .unwrap_or_else(|| "every provider is cached as unhealthy".to_string()),
        })
    }
}
