//! OpenAI-compatible HTTP provider
//!
//! Works against any server exposing `/v1/chat/completions` and `/v1/models`
//! (pcai-inference, vLLM, llama.cpp server, Ollama, LM Studio).

use async_trait::async_trait;
use pcai_application::ports::health_probe::HealthProbe;
use pcai_application::ports::llm_gateway::{GatewayError, LlmGateway};
use pcai_domain::{ChatCompletion, ChatRequest, Provider};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Chat-completion gateway and health probe over HTTP.
#[derive(Debug, Clone, Default)]
pub struct OpenAiCompatibleGateway {
    client: Client,
}

impl OpenAiCompatibleGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn map_transport_error(error: reqwest::Error, timeout: Duration) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(timeout)
    } else if error.is_connect() {
        GatewayError::Connection(error.to_string())
    } else {
        GatewayError::Other(error.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn chat_completion(
        &self,
        provider: &Provider,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<ChatCompletion, GatewayError> {
        let url = provider.endpoint("chat/completions");
        debug!(provider = %provider.id, url = %url, model = %request.model, "POST chat completion");

        let mut builder = self.client.post(&url).timeout(timeout).json(request);
        if let Some(key) = &provider.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| map_transport_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(provider = %provider.id, status = %status, "Provider returned error");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, timeout))?;
        serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(format!("failed to parse response: {e}")))
    }
}

#[async_trait]
impl HealthProbe for OpenAiCompatibleGateway {
    /// `GET /v1/models` answering with a success status.
    async fn probe(&self, provider: &Provider, timeout: Duration) -> bool {
        let url = provider.endpoint("models");
        let mut builder = self.client.get(&url).timeout(timeout);
        if let Some(key) = &provider.api_key {
            builder = builder.bearer_auth(key);
        }
        match builder.send().await {
            Ok(response) => {
                let healthy = response.status().is_success();
                debug!(provider = %provider.id, status = %response.status(), healthy, "Health probe");
                healthy
            }
            Err(e) => {
                debug!(provider = %provider.id, error = %e, "Health probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcai_domain::{ChatMessage, ToolArguments, ToolDefinition};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_at(server: &MockServer) -> Provider {
        Provider::new("local", server.uri(), "functiongemma-270m-it")
    }

    fn request() -> ChatRequest {
        ChatRequest::new("functiongemma-270m-it", vec![ChatMessage::user("Is docker running?")])
            .with_tools(vec![ToolDefinition::function(
                "pcai_get_docker_status",
                "Docker status",
                json!({"type": "object", "properties": {}}),
            )])
    }

    #[tokio::test]
    async fn chat_completion_parses_tool_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({"tool_choice": "auto", "model": "functiongemma-270m-it"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cmpl-1",
                "model": "functiongemma-270m-it",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_0",
                            "type": "function",
                            "function": {"name": "pcai_get_docker_status", "arguments": "{}"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            })))
            .mount(&server)
            .await;

        let completion = OpenAiCompatibleGateway::new()
            .chat_completion(&provider_at(&server), &request(), Duration::from_secs(5))
            .await
            .unwrap();

        let message = completion.first_message().unwrap();
        let call = &message.proposed_tool_calls()[0];
        assert_eq!(call.name(), "pcai_get_docker_status");
        assert_eq!(call.function.arguments, ToolArguments::Raw("{}".to_string()));
    }

    #[tokio::test]
    async fn base_url_ending_in_v1_is_not_doubled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "hi"}}]
            })))
            .mount(&server)
            .await;

        let provider = Provider::new("ollama", format!("{}/v1/", server.uri()), "llama3");
        let completion = OpenAiCompatibleGateway::new()
            .chat_completion(&provider, &request(), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(completion.first_message().unwrap().text(), "hi");
    }

    #[tokio::test]
    async fn api_key_is_sent_as_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_at(&server).with_api_key("sk-test");
        let completion = OpenAiCompatibleGateway::new()
            .chat_completion(&provider, &request(), Duration::from_secs(5))
            .await
            .unwrap();

        assert!(completion.choices.is_empty());
    }

    #[tokio::test]
    async fn error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let err = OpenAiCompatibleGateway::new()
            .chat_completion(&provider_at(&server), &request(), Duration::from_secs(5))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Status {
                status: 503,
                body: "model loading".to_string()
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = OpenAiCompatibleGateway::new()
            .chat_completion(&provider_at(&server), &request(), Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let timeout = Duration::from_millis(50);
        let err = OpenAiCompatibleGateway::new()
            .chat_completion(&provider_at(&server), &request(), timeout)
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::Timeout(timeout));
    }

    #[tokio::test]
    async fn unreachable_provider_is_connection_error() {
        let provider = Provider::new("down", "http://127.0.0.1:1", "m");
        let err = OpenAiCompatibleGateway::new()
            .chat_completion(&provider, &request(), Duration::from_secs(2))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Connection(_)));
    }

    #[tokio::test]
    async fn probe_lists_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let gateway = OpenAiCompatibleGateway::new();
        assert!(gateway.probe(&provider_at(&server), Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn probe_reports_failures_as_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let gateway = OpenAiCompatibleGateway::new();
        assert!(!gateway.probe(&provider_at(&server), Duration::from_secs(2)).await);

        let down = Provider::new("down", "http://127.0.0.1:1", "m");
        assert!(!gateway.probe(&down, Duration::from_millis(500)).await);
    }
}
