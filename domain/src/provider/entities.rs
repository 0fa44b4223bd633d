//! Provider entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A chat-completion backend implementing the OpenAI-compatible API.
///
/// Providers are tried in the order they are configured; `id` is the key used
/// by the health cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Stable identifier (e.g. "pcai-inference", "ollama")
    pub id: String,
    /// Base URL, either the bare host or ending in `/v1`
    pub base_url: String,
    /// Default model served by this provider
    pub model_name: String,
    /// Bearer token sent with every request, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Provider {
    pub fn new(
        id: impl Into<String>,
        base_url: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            base_url: base_url.into(),
            model_name: model_name.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Check that the provider can be addressed at all.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProvider {
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.id.trim().is_empty() {
            return Err(invalid("empty id"));
        }
        if self.base_url.trim().is_empty() {
            return Err(invalid("empty base_url"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(invalid("base_url must start with http:// or https://"));
        }
        if self.model_name.trim().is_empty() {
            return Err(invalid("empty model_name"));
        }
        Ok(())
    }

    /// Build the URL of an OpenAI-compatible endpoint below this provider.
    ///
    /// `path` is relative to the `/v1` root, e.g. `"chat/completions"`.
    pub fn endpoint(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }
}

/// Join a base URL and a `/v1`-relative path.
///
/// `http://host:8000` and `http://host:8000/v1/` both resolve
/// `chat/completions` to `http://host:8000/v1/chat/completions`.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if base.ends_with("/v1") {
        format!("{}/{}", base, path)
    } else {
        format!("{}/v1/{}", base, path)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} @ {})", self.id, self.model_name, self.base_url)
    }
}
