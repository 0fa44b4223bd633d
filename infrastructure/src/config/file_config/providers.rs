//! Provider configuration from TOML (`[[providers]]` and `[router]` sections)

use pcai_application::{DEFAULT_ROUTER_MODEL, DEFAULT_ROUTER_URL};
use pcai_domain::Provider;
use serde::{Deserialize, Serialize};

/// Identifier the router endpoint is tracked under in the health cache.
pub const ROUTER_PROVIDER_ID: &str = "router";

/// One primary LLM backend. Order in the file is fallback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProviderConfig {
    pub id: String,
    pub base_url: String,
    pub model: String,
    /// Environment variable holding a bearer token (not the token itself).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl FileProviderConfig {
    /// Build the domain provider, resolving `api_key_env` through `lookup`.
    pub fn to_provider(&self, lookup: impl Fn(&str) -> Option<String>) -> Provider {
        let provider = Provider::new(&self.id, &self.base_url, &self.model);
        match self.api_key_env.as_deref().and_then(lookup) {
            Some(key) if !key.is_empty() => provider.with_api_key(key),
            _ => provider,
        }
    }
}

/// Default provider list: the local pcai-inference server.
pub fn default_providers() -> Vec<FileProviderConfig> {
    vec![FileProviderConfig {
        id: "pcai-inference".to_string(),
        base_url: "http://127.0.0.1:8080".to_string(),
        model: "pcai-inference".to_string(),
        api_key_env: None,
    }]
}

/// Tool router endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRouterConfig {
    pub base_url: String,
    pub model: String,
    /// When false every request behaves as if the router were bypassed.
    pub enabled: bool,
}

impl Default for FileRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ROUTER_URL.to_string(),
            model: DEFAULT_ROUTER_MODEL.to_string(),
            enabled: true,
        }
    }
}

impl FileRouterConfig {
    pub fn to_provider(&self) -> Provider {
        Provider::new(ROUTER_PROVIDER_ID, &self.base_url, &self.model)
    }
}
