//! Configuration file loading for pcai
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PCAI_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./pcai.toml`
//! 4. Global: `$XDG_CONFIG_HOME/pcai/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileCommandConfig, FileConfig, FileLoggingConfig, FilePromptsConfig,
    FileProviderConfig, FileRouterConfig, FileRoutingConfig, FileToolsConfig, ROUTER_PROVIDER_ID,
    Severity,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
