//! Routed chat use case.
//!
//! Top-level entry point for one request:
//! 1. Pick the mode-specific system prompt
//! 2. Route tools through the router model, degrading gracefully when the
//!    router is bypassed, unhealthy or failing
//! 3. Ask the primary provider chain for the narrative answer
//! 4. In diagnose mode, check that the answer is JSON
//!
//! Only two conditions fail a request: no provider answered, or diagnose
//! mode received non-JSON output while JSON is enforced. Everything else is
//! reported through [`RoutedResponse`] flags.

use crate::config::RoutingParams;
use crate::ports::health_probe::HealthProbe;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::system_prompt::{BuiltinPrompts, SystemPromptPort};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::fallback_chat::{ChatOptions, FallbackChatClient, FallbackError, FallbackReply};
use crate::use_cases::route_tools::{RouteToolsInput, ToolCallRouter};
use pcai_domain::{
    ChatMessage, Clock, Mode, Provider, ProviderHealthCache, RoutedResponse, RouterOutcome,
    SystemClock, ToolResult, preview,
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default router endpoint: a local function-calling model.
pub const DEFAULT_ROUTER_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ROUTER_MODEL: &str = "functiongemma-270m-it";

/// Label introducing tool results in the primary model's user message.
pub const TOOL_RESULTS_LABEL: &str = "TOOL_RESULTS (JSON):";

/// Errors that can occur during a routed request.
#[derive(Error, Debug)]
pub enum RoutedChatError {
    #[error(transparent)]
    Provider(#[from] FallbackError),

    #[error("Diagnose mode requires valid JSON output: {source}")]
    JsonEnforcement {
        #[source]
        source: serde_json::Error,
    },
}

/// Input for [`RoutedChatOrchestrator::execute`].
#[derive(Debug, Clone)]
pub struct RoutedChatRequest {
    pub message: String,
    pub mode: Mode,
    /// Single explicit provider replacing the configured chain
    pub provider: Option<Provider>,
    /// Model override for the primary call
    pub model: Option<String>,
    pub params: RoutingParams,
    /// `None` uses the mode default (enforced for diagnose only)
    pub enforce_json: Option<bool>,
    pub bypass_router: bool,
}

impl RoutedChatRequest {
    pub fn new(message: impl Into<String>, mode: Mode) -> Self {
        Self {
            message: message.into(),
            mode,
            provider: None,
            model: None,
            params: RoutingParams::default(),
            enforce_json: None,
            bypass_router: false,
        }
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_params(mut self, params: RoutingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_enforce_json(mut self, enforce: bool) -> Self {
        self.enforce_json = Some(enforce);
        self
    }

    pub fn with_bypass_router(mut self, bypass: bool) -> Self {
        self.bypass_router = bypass;
        self
    }

    pub fn enforce_json(&self) -> bool {
        self.enforce_json
            .unwrap_or_else(|| self.mode.default_enforce_json())
    }
}

/// Use case composing routing, fallback chat and JSON enforcement.
pub struct RoutedChatOrchestrator {
    router: ToolCallRouter,
    chat: FallbackChatClient,
    probe: Arc<dyn HealthProbe>,
    prompts: Arc<dyn SystemPromptPort>,
    clock: Arc<dyn Clock>,
    providers: Vec<Provider>,
    router_provider: Provider,
}

impl RoutedChatOrchestrator {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tools: Arc<dyn ToolExecutorPort>,
        probe: Arc<dyn HealthProbe>,
        health: Arc<ProviderHealthCache>,
    ) -> Self {
        Self {
            router: ToolCallRouter::new(gateway.clone(), tools),
            chat: FallbackChatClient::new(gateway, health),
            probe,
            prompts: Arc::new(BuiltinPrompts),
            clock: Arc::new(SystemClock),
            providers: Vec::new(),
            router_provider: Provider::new("router", DEFAULT_ROUTER_URL, DEFAULT_ROUTER_MODEL),
        }
    }

    /// Ordered primary provider chain.
    pub fn with_providers(mut self, providers: Vec<Provider>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_router(mut self, router: Provider) -> Self {
        self.router_provider = router;
        self
    }

    pub fn with_prompts(mut self, prompts: Arc<dyn SystemPromptPort>) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn router(&self) -> &ToolCallRouter {
        &self.router
    }

    pub fn system_prompt(&self, mode: Mode) -> String {
        self.prompts.system_prompt(mode)
    }

    /// Run one request to completion.
    pub async fn execute(&self, request: RoutedChatRequest) -> Result<RoutedResponse, RoutedChatError> {
        let started_at = self.clock.now();
        let mode = request.mode;
        info!(mode = %mode, "Routed request: {}", preview(&request.message, 100));

        let system = self.system_prompt(mode);
        let outcome = self
            .route(&request.message, &request.params, request.bypass_router)
            .await;

        let messages = [
            ChatMessage::system(system),
            ChatMessage::user(build_user_content(&request.message, &outcome.tool_results)),
        ];
        let reply = self
            .chat(&messages, request.provider.as_ref(), request.model.clone(), &request.params)
            .await?;

        let text = reply.message.text().to_string();
        let response = RoutedResponse::new(
            mode,
            request.message.as_str(),
            outcome,
            text,
            reply.provider.id,
            reply.model,
            started_at,
            self.clock.now(),
        );

        if !mode.expects_json() {
            return Ok(response);
        }
        let json = check_json_answer(&response.response, request.enforce_json())?;
        Ok(response.with_json(json))
    }

    /// Routing stage with graceful degradation. Never fails.
    pub async fn route(&self, message: &str, params: &RoutingParams, bypass: bool) -> RouterOutcome {
        if bypass {
            info!("Router bypassed");
            return RouterOutcome::degraded();
        }
        if !self.router_healthy(params).await {
            warn!(router = %self.router_provider.id, "Router unavailable; answering without tools");
            return RouterOutcome::degraded();
        }

        let input = RouteToolsInput::new(message, self.router_provider.clone())
            .with_tools(self.router.executor().tool_definitions().to_vec())
            .with_params(params.clone())
            .with_return_final(false);

        match self.router.run(&input).await {
            Ok(run) => {
                debug!(
                    calls = run.tool_calls.len(),
                    results = run.tool_results.len(),
                    "Router finished"
                );
                run.into_outcome()
            }
            Err(e) => {
                warn!(router = %self.router_provider.id, error = %e, "Router failed; answering without tools");
                self.chat.health().set(&self.router_provider.id, false);
                RouterOutcome::degraded()
            }
        }
    }

    /// Primary chat call over the configured chain, or over `provider` alone.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        provider: Option<&Provider>,
        model: Option<String>,
        params: &RoutingParams,
    ) -> Result<FallbackReply, FallbackError> {
        let options = ChatOptions::default()
            .with_model(model)
            .with_temperature(params.temperature)
            .with_timeout(params.timeout);
        match provider {
            Some(provider) => {
                self.chat
                    .chat(std::slice::from_ref(provider), messages, &options)
                    .await
            }
            None => self.chat.chat(&self.providers, messages, &options).await,
        }
    }

    async fn router_healthy(&self, params: &RoutingParams) -> bool {
        let health = self.chat.health();
        let id = &self.router_provider.id;
        if let Some(healthy) = health.get(id) {
            debug!(router = %id, healthy, "Router health from cache");
            return healthy;
        }
        let healthy = tokio::time::timeout(
            params.probe_timeout,
            self.probe.probe(&self.router_provider, params.probe_timeout),
        )
        .await
        .unwrap_or(false);
        health.set(id, healthy);
        healthy
    }
}

/// JSON check applied to a diagnose-mode answer.
///
/// Returns the parsed value, or the parse error as text when enforcement is
/// off. With enforcement on, a parse failure is fatal.
pub fn check_json_answer(
    text: &str,
    enforce: bool,
) -> Result<Result<Value, String>, RoutedChatError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => {
            info!("Diagnose response is valid JSON");
            Ok(Ok(value))
        }
        Err(e) if enforce => {
            warn!(error = %e, "Diagnose response is not valid JSON");
            Err(RoutedChatError::JsonEnforcement { source: e })
        }
        Err(e) => {
            warn!(error = %e, "Diagnose response is not valid JSON; enforcement disabled");
            Ok(Err(e.to_string()))
        }
    }
}

/// User content for the primary model: the message plus a labeled block of
/// tool results, when there are any.
pub fn build_user_content(message: &str, results: &[ToolResult]) -> String {
    if results.is_empty() {
        return message.to_string();
    }
    let block = serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string());
    format!("{message}\n\n{TOOL_RESULTS_LABEL}\n{block}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        MapToolExecutor, ScriptedGateway, StaticProbe, call, connection_refused, provider,
        text_reply, tool_call_reply,
    };
    use crate::ports::system_prompt::DEFAULT_DIAGNOSE_PROMPT;
    use pcai_domain::Role;
    use serde_json::json;

    struct Fixture {
        gateway: Arc<ScriptedGateway>,
        probe: Arc<StaticProbe>,
        health: Arc<ProviderHealthCache>,
        tools: Arc<MapToolExecutor>,
    }

    impl Fixture {
        fn new(gateway: ScriptedGateway, router_healthy: bool) -> Self {
            Self {
                gateway: Arc::new(gateway),
                probe: Arc::new(StaticProbe::new(router_healthy)),
                health: Arc::new(ProviderHealthCache::default()),
                tools: Arc::new(
                    MapToolExecutor::new()
                        .with_tool("pcai_get_docker_status", Ok(json!({"Running": true}))),
                ),
            }
        }

        fn orchestrator(&self) -> RoutedChatOrchestrator {
            RoutedChatOrchestrator::new(
                self.gateway.clone(),
                self.tools.clone(),
                self.probe.clone(),
                self.health.clone(),
            )
            .with_providers(vec![provider("primary")])
            .with_router(provider("router"))
        }
    }

    #[tokio::test]
    async fn unhealthy_router_degrades_but_still_answers() {
        let fx = Fixture::new(ScriptedGateway::new().push("primary", text_reply("Docker looks fine")), false);

        let resp = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("Is docker ok?", Mode::Chat))
            .await
            .unwrap();

        assert!(!resp.router_available);
        assert!(resp.degraded);
        assert!(resp.tool_calls.is_empty());
        assert_eq!(resp.response, "Docker looks fine");
        assert!(fx.gateway.calls_to("router").is_empty());
        assert_eq!(fx.probe.probe_count(), 1);
    }

    #[tokio::test]
    async fn router_connection_error_degrades_to_primary_answer() {
        let fx = Fixture::new(
            ScriptedGateway::new()
                .push("router", connection_refused())
                .push("primary", text_reply("answer without tools")),
            true,
        );

        let resp = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("Is docker ok?", Mode::Chat))
            .await
            .unwrap();

        assert!(resp.degraded);
        assert!(!resp.router_available);
        assert!(resp.tool_results.is_empty());
        assert_eq!(resp.response, "answer without tools");
        assert_eq!(resp.provider, "primary");
        assert_eq!(fx.health.get("router"), Some(false));
    }

    #[tokio::test]
    async fn tool_results_reach_primary_model_in_labeled_block() {
        let fx = Fixture::new(
            ScriptedGateway::new()
                .push(
                    "router",
                    tool_call_reply(vec![call("c1", "pcai_get_docker_status", "{}")]),
                )
                .push("primary", text_reply("Docker is running")),
            true,
        );

        let resp = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("Is docker ok?", Mode::Chat))
            .await
            .unwrap();

        assert!(resp.router_available);
        assert!(!resp.degraded);
        assert_eq!(resp.tool_results.len(), 1);
        assert_eq!(resp.tool_results[0].result, "{\"Running\":true}");

        let primary = &fx.gateway.calls_to("primary")[0];
        assert_eq!(primary.messages.len(), 2);
        assert_eq!(primary.messages[0].role, Role::System);
        let user = primary.messages[1].text();
        assert!(user.starts_with("Is docker ok?"));
        assert!(user.contains(TOOL_RESULTS_LABEL));
        assert!(user.contains("pcai_get_docker_status"));
        // Router is asked once: the narrative always comes from the primary model.
        assert_eq!(fx.gateway.calls_to("router").len(), 1);
    }

    #[tokio::test]
    async fn bypass_skips_probe_and_router() {
        let fx = Fixture::new(ScriptedGateway::new().push("primary", text_reply("ok")), true);

        let resp = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("hi", Mode::Chat).with_bypass_router(true))
            .await
            .unwrap();

        assert!(resp.degraded);
        assert!(!resp.router_available);
        assert_eq!(fx.probe.probe_count(), 0);
        assert!(fx.gateway.calls_to("router").is_empty());
    }

    #[tokio::test]
    async fn cached_router_health_skips_probe() {
        let fx = Fixture::new(
            ScriptedGateway::new()
                .push("router", text_reply("no tools needed"))
                .push("primary", text_reply("ok")),
            false,
        );
        fx.health.set("router", true);

        let resp = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("hi", Mode::Chat))
            .await
            .unwrap();

        assert_eq!(fx.probe.probe_count(), 0);
        assert!(resp.router_available);
        assert!(resp.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn diagnose_non_json_with_enforcement_fails() {
        let fx = Fixture::new(ScriptedGateway::new().push("primary", text_reply("Your disk is fine.")), false);

        let err = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("diagnose disk", Mode::Diagnose))
            .await
            .unwrap_err();

        assert!(matches!(err, RoutedChatError::JsonEnforcement { .. }));
        assert!(err.to_string().contains("requires valid JSON output"));
    }

    #[tokio::test]
    async fn diagnose_non_json_without_enforcement_passes_through() {
        let fx = Fixture::new(ScriptedGateway::new().push("primary", text_reply("not json")), false);

        let resp = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("diagnose", Mode::Diagnose).with_enforce_json(false))
            .await
            .unwrap();

        assert!(!resp.json_valid);
        assert!(resp.json_error.is_some());
        assert!(resp.response_json.is_none());
        assert_eq!(resp.response, "not json");
    }

    #[tokio::test]
    async fn diagnose_json_is_parsed() {
        let answer = r#"{"summary":"ok","findings":[],"recommendations":["reboot"]}"#;
        let fx = Fixture::new(ScriptedGateway::new().push("primary", text_reply(answer)), false);

        let resp = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("diagnose", Mode::Diagnose))
            .await
            .unwrap();

        assert!(resp.json_valid);
        assert_eq!(resp.response_json.unwrap()["recommendations"][0], "reboot");
        let primary = &fx.gateway.calls_to("primary")[0];
        assert_eq!(primary.messages[0].text(), DEFAULT_DIAGNOSE_PROMPT);
    }

    #[tokio::test]
    async fn chat_mode_never_validates_json() {
        for text in [r#"{"summary":"x"}"#, "plain text"] {
            let fx = Fixture::new(ScriptedGateway::new().push("primary", text_reply(text)), false);
            let resp = fx
                .orchestrator()
                .execute(RoutedChatRequest::new("hi", Mode::Chat).with_enforce_json(true))
                .await
                .unwrap();
            assert!(!resp.json_valid);
            assert!(resp.response_json.is_none());
            assert_eq!(resp.response, text);
        }
    }

    #[tokio::test]
    async fn no_provider_available_is_fatal() {
        let fx = Fixture::new(ScriptedGateway::new(), false);

        let err = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("hi", Mode::Chat))
            .await
            .unwrap_err();

        assert!(matches!(err, RoutedChatError::Provider(FallbackError::ProviderUnavailable { .. })));
    }

    #[tokio::test]
    async fn explicit_provider_replaces_chain() {
        let fx = Fixture::new(ScriptedGateway::new().push("ollama", text_reply("from ollama")), false);

        let resp = fx
            .orchestrator()
            .execute(RoutedChatRequest::new("hi", Mode::Chat).with_provider(provider("ollama")))
            .await
            .unwrap();

        assert_eq!(resp.provider, "ollama");
        assert!(fx.gateway.calls_to("primary").is_empty());
    }

    #[test]
    fn user_content_without_results_is_the_message() {
        assert_eq!(build_user_content("hello", &[]), "hello");
    }
}
