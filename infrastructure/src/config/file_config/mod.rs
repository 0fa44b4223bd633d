//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are converted into application and domain values once at startup;
//! nothing below the binary reads files or the environment.

mod logging;
mod providers;
mod routing;
mod tools;

pub use logging::{FileLoggingConfig, FilePromptsConfig};
pub use providers::{FileProviderConfig, FileRouterConfig, ROUTER_PROVIDER_ID, default_providers};
pub use routing::FileRoutingConfig;
pub use tools::{FileCommandConfig, FileToolsConfig};

use pcai_application::RoutingParams;
use pcai_domain::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// How serious a configuration issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Usable, but probably not what was intended
    Warning,
    /// The binary refuses to start
    Error,
}

/// A problem found by [`FileConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub message: String,
}

impl ConfigIssue {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "warning: {}", self.message),
            Severity::Error => write!(f, "error: {}", self.message),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Primary providers in fallback order
    pub providers: Vec<FileProviderConfig>,
    pub router: FileRouterConfig,
    pub routing: FileRoutingConfig,
    pub tools: FileToolsConfig,
    pub prompts: FilePromptsConfig,
    pub logging: FileLoggingConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            router: FileRouterConfig::default(),
            routing: FileRoutingConfig::default(),
            tools: FileToolsConfig::default(),
            prompts: FilePromptsConfig::default(),
            logging: FileLoggingConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.providers.is_empty() {
            issues.push(ConfigIssue::error("no providers configured"));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if let Err(e) = provider.to_provider(|_| None).validate() {
                issues.push(ConfigIssue::error(format!("providers: {}", e)));
            }
            if !seen.insert(provider.id.as_str()) {
                issues.push(ConfigIssue::warning(format!(
                    "providers: duplicate id '{}' shares one health entry",
                    provider.id
                )));
            }
        }

        if self.router.enabled {
            if let Err(e) = self.router.to_provider().validate() {
                issues.push(ConfigIssue::error(format!("router: {}", e)));
            }
            if self.providers.iter().any(|p| p.id == ROUTER_PROVIDER_ID) {
                issues.push(ConfigIssue::error(format!(
                    "providers: id '{}' is reserved for the router",
                    ROUTER_PROVIDER_ID
                )));
            }
        }

        if self.routing.timeout_secs == 0 {
            issues.push(ConfigIssue::error("routing.timeout_secs cannot be 0"));
        }
        if self.routing.probe_timeout_secs == 0 {
            issues.push(ConfigIssue::error("routing.probe_timeout_secs cannot be 0"));
        }
        if self.routing.health_ttl_secs == 0 {
            issues.push(ConfigIssue::warning(
                "routing.health_ttl_secs is 0, provider health is never cached",
            ));
        }
        if self.routing.execute_tools && self.routing.max_tool_calls == 0 {
            issues.push(ConfigIssue::warning(
                "routing.max_tool_calls is 0, no tool will ever run",
            ));
        }

        if self.tools.timeout_secs == 0 {
            issues.push(ConfigIssue::error("tools.timeout_secs cannot be 0"));
        }
        let mut commands: Vec<_> = self.tools.commands.iter().collect();
        commands.sort_by(|a, b| a.0.cmp(b.0));
        for (name, command) in commands {
            if command.program.trim().is_empty() {
                issues.push(ConfigIssue::error(format!(
                    "tools.commands.{}: program cannot be empty",
                    name
                )));
            }
        }

        issues
    }

    /// Providers in fallback order, with API keys read from the environment.
    pub fn to_providers(&self) -> Vec<Provider> {
        self.to_providers_with(|name| std::env::var(name).ok())
    }

    pub fn to_providers_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<Provider> {
        self.providers
            .iter()
            .map(|p| p.to_provider(&lookup))
            .collect()
    }

    pub fn to_routing_params(&self) -> RoutingParams {
        self.routing.to_routing_params()
    }

    /// The router endpoint, or `None` when routing is disabled.
    pub fn router_provider(&self) -> Option<Provider> {
        self.router.enabled.then(|| self.router.to_provider())
    }
}

#[cfg(test)]
pub(crate) fn parse_toml(toml: &str) -> FileConfig {
    use figment::Figment;
    use figment::providers::{Format, Serialized, Toml};

    Figment::new()
        .merge(Serialized::defaults(FileConfig::default()))
        .merge(Toml::string(toml))
        .extract()
        .unwrap()
}
