//! Tools configuration from TOML (`[tools]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [tools]
//! catalog = "Config/pcai-tools.json"
//! timeout_secs = 60
//!
//! [tools.commands.pcai_get_disk_health]
//! program = "pwsh"
//! args = ["-NoProfile", "-File", "Tools/Get-DiskHealth.ps1"]
//! ```

use crate::tools::{CommandTool, DEFAULT_CATALOG_PATH, DEFAULT_TOOL_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// External program bound to a catalog tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCommandConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl FileCommandConfig {
    pub fn to_tool(&self) -> CommandTool {
        CommandTool::new(&self.program, self.args.iter().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Path of the JSON tool catalog
    pub catalog: String,
    /// Per-call timeout applied by the tool registry
    pub timeout_secs: u64,
    /// Tool name → command binding
    pub commands: HashMap<String, FileCommandConfig>,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG_PATH.to_string(),
            timeout_secs: DEFAULT_TOOL_TIMEOUT.as_secs(),
            commands: HashMap::new(),
        }
    }
}

impl FileToolsConfig {
    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.catalog)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
