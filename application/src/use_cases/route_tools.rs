//! Tool routing use case (ReAct loop).
//!
//! A small router model plans tool invocations; this use case executes them
//! and optionally asks the router for a final answer.
//!
//! ```text
//! AwaitRouterResponse ──▶ ExecutingTools ──▶ FinalSynthesis ──▶ Done
//!         │                     │                                ▲
//!         └── no choices / no ──┴── return_final unset or ───────┘
//!             tool calls            nothing executed
//! ```
//!
//! Only the planning call (and the optional final call) can fail the run.
//! Tool failures are embedded in the corresponding result text and never
//! abort the loop.

use crate::config::RoutingParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use pcai_domain::{
    ChatCompletion, ChatMessage, ChatRequest, Provider, RouterOutcome, ToolCall, ToolDefinition,
    ToolError, ToolParameterValidator, ToolResult, preview, truncate_result,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Final answer reported when the router response has no choices.
pub const NO_CHOICES_RESPONSE: &str = "Error: router returned no choices";

/// Errors that can occur while routing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("Router call failed: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for [`ToolCallRouter::run`].
#[derive(Debug, Clone)]
pub struct RouteToolsInput {
    /// Fully assembled prompt sent as the only user message.
    pub prompt: String,
    /// Router endpoint and model.
    pub router: Provider,
    /// Tool schema offered to the router.
    pub tools: Vec<ToolDefinition>,
    pub params: RoutingParams,
    /// Ask the router for a final answer after executing tools.
    pub return_final: bool,
}

impl RouteToolsInput {
    pub fn new(prompt: impl Into<String>, router: Provider) -> Self {
        Self {
            prompt: prompt.into(),
            router,
            tools: Vec::new(),
            params: RoutingParams::default(),
            return_final: false,
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_params(mut self, params: RoutingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_return_final(mut self, return_final: bool) -> Self {
        self.return_final = return_final;
        self
    }
}

/// Result of a router run.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterRun {
    /// Tool calls that were handled, after the cap
    pub tool_calls: Vec<ToolCall>,
    pub tool_results: Vec<ToolResult>,
    /// Text of the router's last message, or an error description
    pub response: String,
    /// Router's last message as received
    pub raw_response: Option<ChatMessage>,
    pub model: String,
    pub base_url: String,
}

impl RouterRun {
    pub fn into_outcome(self) -> RouterOutcome {
        RouterOutcome::routed(self.tool_calls, self.tool_results)
    }
}

/// States of the router loop.
#[derive(Debug)]
enum RouterState {
    AwaitRouterResponse,
    ExecutingTools(Vec<ToolCall>),
    FinalSynthesis,
    Done,
}

/// Mutable data carried between states.
struct RouterContext {
    messages: Vec<ChatMessage>,
    tool_calls: Vec<ToolCall>,
    tool_results: Vec<ToolResult>,
    last_message: Option<ChatMessage>,
    response_override: Option<String>,
    model: String,
}

impl RouterContext {
    fn new(input: &RouteToolsInput) -> Self {
        Self {
            messages: vec![ChatMessage::user(input.prompt.clone())],
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
            last_message: None,
            response_override: None,
            model: input.router.model_name.clone(),
        }
    }

    fn finish(self, input: &RouteToolsInput) -> RouterRun {
        let response = match self.response_override {
            Some(text) => text,
            None => self
                .last_message
                .as_ref()
                .map(|m| m.text().to_string())
                .unwrap_or_default(),
        };
        RouterRun {
            tool_calls: self.tool_calls,
            tool_results: self.tool_results,
            response,
            raw_response: self.last_message,
            model: self.model,
            base_url: input.router.base_url.clone(),
        }
    }
}

/// Use case for routing a prompt through the router model.
#[derive(Clone)]
pub struct ToolCallRouter {
    gateway: Arc<dyn LlmGateway>,
    executor: Arc<dyn ToolExecutorPort>,
    validator: ToolParameterValidator,
}

impl ToolCallRouter {
    pub fn new(gateway: Arc<dyn LlmGateway>, executor: Arc<dyn ToolExecutorPort>) -> Self {
        Self {
            gateway,
            executor,
            validator: ToolParameterValidator,
        }
    }

    pub fn executor(&self) -> &Arc<dyn ToolExecutorPort> {
        &self.executor
    }

    /// Run the loop to completion.
    pub async fn run(&self, input: &RouteToolsInput) -> Result<RouterRun, RouterError> {
        info!(
            router = %input.router.id,
            model = %input.router.model_name,
            tools = input.tools.len(),
            "Routing prompt: {}",
            preview(&input.prompt, 100)
        );

        let mut ctx = RouterContext::new(input);
        let mut state = RouterState::AwaitRouterResponse;
        loop {
            debug!(?state, "Router state");
            state = match state {
                RouterState::AwaitRouterResponse => self.await_router_response(input, &mut ctx).await?,
                RouterState::ExecutingTools(calls) => self.execute_tools(input, calls, &mut ctx).await,
                RouterState::FinalSynthesis => self.final_synthesis(input, &mut ctx).await?,
                RouterState::Done => return Ok(ctx.finish(input)),
            };
        }
    }

    async fn await_router_response(
        &self,
        input: &RouteToolsInput,
        ctx: &mut RouterContext,
    ) -> Result<RouterState, RouterError> {
        let request = ChatRequest::new(ctx.model.clone(), ctx.messages.clone())
            .with_tools(input.tools.clone())
            .with_temperature(input.params.temperature);
        let completion = self.call_router(input, &request).await?;
        if let Some(model) = &completion.model {
            ctx.model = model.clone();
        }

        let Some(message) = completion.into_first_message() else {
            warn!(router = %input.router.id, "Router returned no choices");
            ctx.response_override = Some(NO_CHOICES_RESPONSE.to_string());
            return Ok(RouterState::Done);
        };

        let proposed = message.proposed_tool_calls().to_vec();
        ctx.last_message = Some(message);
        if proposed.is_empty() {
            debug!("Router proposed no tool calls");
            return Ok(RouterState::Done);
        }

        let max = input.params.max_tool_calls;
        if proposed.len() > max {
            info!(
                proposed = proposed.len(),
                max, "Router proposed more tool calls than allowed; dropping the rest"
            );
        }
        let calls: Vec<ToolCall> = proposed.into_iter().take(max).collect();
        ctx.tool_calls = calls.clone();

        if calls.is_empty() || !input.params.execute_tools {
            return Ok(RouterState::Done);
        }
        Ok(RouterState::ExecutingTools(calls))
    }

    async fn execute_tools(
        &self,
        input: &RouteToolsInput,
        calls: Vec<ToolCall>,
        ctx: &mut RouterContext,
    ) -> RouterState {
        for call in calls {
            let result = self.execute_call(&call, &input.params).await;
            ctx.messages
                .push(ChatMessage::assistant_tool_calls(vec![call.clone()]));
            ctx.messages
                .push(ChatMessage::tool(call.id.clone(), result.result.clone()));
            ctx.tool_results.push(result);
        }

        if input.return_final && !ctx.tool_results.is_empty() {
            RouterState::FinalSynthesis
        } else {
            RouterState::Done
        }
    }

    async fn final_synthesis(
        &self,
        input: &RouteToolsInput,
        ctx: &mut RouterContext,
    ) -> Result<RouterState, RouterError> {
        let request = ChatRequest::new(ctx.model.clone(), ctx.messages.clone())
            .with_temperature(input.params.temperature);
        let completion = self.call_router(input, &request).await?;
        match completion.into_first_message() {
            Some(message) => ctx.last_message = Some(message),
            None => warn!("Router final call returned no choices; keeping planning response"),
        }
        Ok(RouterState::Done)
    }

    async fn call_router(
        &self,
        input: &RouteToolsInput,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, GatewayError> {
        let timeout = input.params.timeout;
        match tokio::time::timeout(
            timeout,
            self.gateway.chat_completion(&input.router, request, timeout),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout(timeout)),
        }
    }

    /// Execute one tool call; failures become the result text.
    ///
    /// Arguments that fail to parse are replaced by an empty object. Schema
    /// violations are logged and the call is executed anyway.
    pub async fn execute_call(&self, call: &ToolCall, params: &RoutingParams) -> ToolResult {
        let name = call.name();
        let arguments = match call.function.arguments.try_normalize() {
            Ok(arguments) => arguments,
            Err(e) => {
                warn!(tool = name, error = %e, "Malformed tool arguments; using an empty object");
                Map::new()
            }
        };

        if params.validate_arguments {
            if let Some(schema) = self.executor.schema_for(name) {
                let report = self.validator.validate(Some(&arguments), Some(schema));
                if !report.is_valid {
                    warn!(tool = name, errors = ?report.errors, "Tool arguments failed validation; executing anyway");
                }
            }
        }

        let text = match tokio::time::timeout(params.timeout, self.executor.execute(name, &arguments)).await {
            Ok(Ok(value)) => value_to_text(value),
            Ok(Err(e)) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                error_text(&e)
            }
            Err(_) => {
                let e = ToolError::timeout(name);
                warn!(tool = name, "Tool execution timed out");
                error_text(&e)
            }
        };

        let (text, truncated) = truncate_result(&text, params.result_limit);
        if truncated {
            debug!(tool = name, limit = params.result_limit, "Tool result truncated");
        }
        ToolResult::new(name, arguments, text).with_truncated(truncated)
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn error_text(error: &ToolError) -> String {
    format!("Error executing tool: {}", error.message)
}
