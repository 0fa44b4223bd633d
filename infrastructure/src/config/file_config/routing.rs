//! Routing configuration from TOML (`[routing]` section)

use pcai_application::RoutingParams;
use pcai_domain::{DEFAULT_HEALTH_TTL, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw routing configuration. Durations are whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoutingConfig {
    pub execute_tools: bool,
    pub max_tool_calls: usize,
    /// Characters kept per tool result (0 = unlimited)
    pub result_limit: usize,
    pub timeout_secs: u64,
    pub probe_timeout_secs: u64,
    pub temperature: f32,
    pub health_ttl_secs: u64,
    pub validate_arguments: bool,
    pub text_tool_calls: bool,
}

impl Default for FileRoutingConfig {
    fn default() -> Self {
        let params = RoutingParams::default();
        Self {
            execute_tools: params.execute_tools,
            max_tool_calls: params.max_tool_calls,
            result_limit: params.result_limit,
            timeout_secs: params.timeout.as_secs(),
            probe_timeout_secs: params.probe_timeout.as_secs(),
            temperature: DEFAULT_TEMPERATURE,
            health_ttl_secs: DEFAULT_HEALTH_TTL.as_secs(),
            validate_arguments: params.validate_arguments,
            text_tool_calls: params.text_tool_calls,
        }
    }
}

impl FileRoutingConfig {
    pub fn to_routing_params(&self) -> RoutingParams {
        RoutingParams::default()
            .with_execute_tools(self.execute_tools)
            .with_max_tool_calls(self.max_tool_calls)
            .with_result_limit(self.result_limit)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_probe_timeout(Duration::from_secs(self.probe_timeout_secs))
            .with_temperature(self.temperature)
            .with_validate_arguments(self.validate_arguments)
            .with_text_tool_calls(self.text_tool_calls)
    }

    pub fn health_ttl(&self) -> Duration {
        Duration::from_secs(self.health_ttl_secs)
    }
}
