//! Interactive chat session.
//!
//! Keeps the conversation history in memory for one interactive run. Each
//! turn is routed like a one-shot request, but the primary model sees the
//! whole history. Nothing is persisted.

use crate::config::RoutingParams;
use crate::use_cases::routed_chat::{
    RoutedChatError, RoutedChatOrchestrator, build_user_content, check_json_answer,
};
use crate::use_cases::text_tool_calls::{format_text_tool_results, parse_text_tool_calls};
use pcai_domain::{ChatMessage, Mode, RouterOutcome, ToolResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of one interactive turn.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub response: String,
    pub provider: String,
    pub model: String,
    pub outcome: RouterOutcome,
    /// Results of `callTool(...)` requests found in the reply
    pub text_tool_results: Vec<ToolResult>,
    pub response_json: Option<Value>,
    pub json_valid: bool,
    pub json_error: Option<String>,
}

/// In-memory conversation driven by a [`RoutedChatOrchestrator`].
pub struct ChatSession {
    orchestrator: Arc<RoutedChatOrchestrator>,
    mode: Mode,
    params: RoutingParams,
    model: Option<String>,
    bypass_router: bool,
    /// `None` uses the mode default
    enforce_json: Option<bool>,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(orchestrator: Arc<RoutedChatOrchestrator>, mode: Mode, params: RoutingParams) -> Self {
        let history = vec![ChatMessage::system(orchestrator.system_prompt(mode))];
        Self {
            orchestrator,
            mode,
            params,
            model: None,
            bypass_router: false,
            enforce_json: None,
            history,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn with_bypass_router(mut self, bypass: bool) -> Self {
        self.bypass_router = bypass;
        self
    }

    pub fn with_enforce_json(mut self, enforce: bool) -> Self {
        self.enforce_json = Some(enforce);
        self
    }

    pub fn enforce_json(&self) -> bool {
        self.enforce_json
            .unwrap_or_else(|| self.mode.default_enforce_json())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Clear the conversation back to the system prompt.
    pub fn reset(&mut self) {
        self.history.truncate(1);
        info!("Chat history reset");
    }

    /// Run one turn. On failure the history is left as it was before the turn.
    pub async fn send(&mut self, message: &str) -> Result<ChatTurn, RoutedChatError> {
        let checkpoint = self.history.len();
        let result = self.run_turn(message).await;
        if result.is_err() {
            self.history.truncate(checkpoint);
        }
        result
    }

    async fn run_turn(&mut self, message: &str) -> Result<ChatTurn, RoutedChatError> {
        let outcome = self
            .orchestrator
            .route(message, &self.params, self.bypass_router)
            .await;
        self.history.push(ChatMessage::user(build_user_content(
            message,
            &outcome.tool_results,
        )));

        let mut reply = self
            .orchestrator
            .chat(&self.history, None, self.model.clone(), &self.params)
            .await?;
        self.history
            .push(ChatMessage::assistant(reply.message.text().to_string()));

        let mut text_tool_results = Vec::new();
        // Text calls obey the same report-only switch as router calls.
        if self.params.execute_tools && self.params.text_tool_calls {
            let calls = parse_text_tool_calls(reply.message.text());
            if !calls.is_empty() {
                debug!(calls = calls.len(), "Reply contains callTool requests");
                for call in calls.iter().take(self.params.max_tool_calls) {
                    let result = self
                        .orchestrator
                        .router()
                        .execute_call(call, &self.params)
                        .await;
                    text_tool_results.push(result);
                }
                self.history
                    .push(ChatMessage::user(format_text_tool_results(&text_tool_results)));
                reply = self
                    .orchestrator
                    .chat(&self.history, None, self.model.clone(), &self.params)
                    .await?;
                self.history
                    .push(ChatMessage::assistant(reply.message.text().to_string()));
            }
        }

        let response = reply.message.text().to_string();
        let (response_json, json_error) = if self.mode.expects_json() {
            match check_json_answer(&response, self.enforce_json())? {
                Ok(value) => (Some(value), None),
                Err(e) => (None, Some(e)),
            }
        } else {
            (None, None)
        };

        Ok(ChatTurn {
            response,
            provider: reply.provider.id,
            model: reply.model,
            outcome,
            text_tool_results,
            json_valid: response_json.is_some(),
            response_json,
            json_error,
        })
    }
}
