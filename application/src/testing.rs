//! Scripted port implementations shared by the use case tests.

use crate::ports::health_probe::HealthProbe;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use pcai_domain::{
    ChatCompletion, ChatMessage, ChatRequest, Provider, ToolArguments, ToolCall, ToolDefinition,
    ToolError,
};
use serde_json::{Map, Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ==================== Gateway ====================

/// Gateway that replays scripted replies per provider id.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<HashMap<String, VecDeque<Result<ChatCompletion, GatewayError>>>>,
    calls: Mutex<Vec<(String, ChatRequest)>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(self, provider_id: &str, reply: Result<ChatCompletion, GatewayError>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(provider_id.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<(String, ChatRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, provider_id: &str) -> Vec<ChatRequest> {
        self.calls()
            .into_iter()
            .filter(|(id, _)| id == provider_id)
            .map(|(_, req)| req)
            .collect()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn chat_completion(
        &self,
        provider: &Provider,
        request: &ChatRequest,
        _timeout: Duration,
    ) -> Result<ChatCompletion, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((provider.id.clone(), request.clone()));
        self.replies
            .lock()
            .unwrap()
            .get_mut(&provider.id)
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| Err(GatewayError::Connection(format!("{} refused", provider.id))))
    }
}

pub fn text_reply(text: &str) -> Result<ChatCompletion, GatewayError> {
    Ok(ChatCompletion::from_message(ChatMessage::assistant(text)).with_model("scripted-model"))
}

pub fn tool_call_reply(calls: Vec<ToolCall>) -> Result<ChatCompletion, GatewayError> {
    Ok(ChatCompletion::from_message(ChatMessage::assistant_tool_calls(calls)))
}

pub fn call(id: &str, name: &str, raw_args: &str) -> ToolCall {
    ToolCall::new(id, name, ToolArguments::Raw(raw_args.to_string()))
}

pub fn connection_refused() -> Result<ChatCompletion, GatewayError> {
    Err(GatewayError::Connection("connection refused".to_string()))
}

// ==================== Health probe ====================

pub struct StaticProbe {
    healthy: bool,
    probes: AtomicUsize,
}

impl StaticProbe {
    pub fn new(healthy: bool) -> Self {
        Self {
            healthy,
            probes: AtomicUsize::new(0),
        }
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthProbe for StaticProbe {
    async fn probe(&self, _provider: &Provider, _timeout: Duration) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.healthy
    }
}

// ==================== Tools ====================

/// Tool executor returning fixed values per tool name.
pub struct MapToolExecutor {
    definitions: Vec<ToolDefinition>,
    results: HashMap<String, Result<Value, ToolError>>,
    executed: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl MapToolExecutor {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            results: HashMap::new(),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tool(mut self, name: &str, result: Result<Value, ToolError>) -> Self {
        self.definitions.push(ToolDefinition::function(
            name,
            format!("{name} test tool"),
            json!({"type": "object", "properties": {}}),
        ));
        self.results.insert(name.to_string(), result);
        self
    }

    pub fn with_schema(mut self, name: &str, schema: Value, result: Result<Value, ToolError>) -> Self {
        self.definitions
            .push(ToolDefinition::function(name, "schema tool", schema));
        self.results.insert(name.to_string(), result);
        self
    }

    pub fn executed(&self) -> Vec<(String, Map<String, Value>)> {
        self.executed.lock().unwrap().clone()
    }

    pub fn executed_names(&self) -> Vec<String> {
        self.executed().into_iter().map(|(n, _)| n).collect()
    }
}

#[async_trait]
impl ToolExecutorPort for MapToolExecutor {
    fn tool_definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    async fn execute(&self, name: &str, arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        self.executed
            .lock()
            .unwrap()
            .push((name.to_string(), arguments.clone()));
        self.results
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(ToolError::not_found(name)))
    }
}

pub fn provider(id: &str) -> Provider {
    Provider::new(id, format!("http://{id}.test:8000"), format!("{id}-model"))
}
