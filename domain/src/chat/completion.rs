//! Chat-completion request and response bodies
//!
//! These mirror the OpenAI-compatible wire format closely enough to be
//! serialized directly by the HTTP adapter.

use super::message::ChatMessage;
use crate::tool::entities::ToolDefinition;
use serde::{Deserialize, Serialize};

/// Default sampling temperature for routing and narrative calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Body of `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: None,
            tool_choice: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Offer `tools` to the model with `tool_choice: "auto"`.
    ///
    /// An empty list leaves the request tool-free.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        if tools.is_empty() {
            self.tools = None;
            self.tool_choice = None;
        } else {
            self.tools = Some(tools);
            self.tool_choice = Some("auto".to_string());
        }
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// One entry of `choices` in a completion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Response of `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletion {
    /// Completion with a single assistant choice.
    pub fn from_message(message: ChatMessage) -> Self {
        Self {
            id: None,
            model: None,
            choices: vec![Choice {
                index: 0,
                message,
                finish_reason: Some("stop".to_string()),
            }],
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn first_message(&self) -> Option<&ChatMessage> {
        self.choices.first().map(|c| &c.message)
    }

    pub fn into_first_message(self) -> Option<ChatMessage> {
        self.choices.into_iter().next().map(|c| c.message)
    }
}
