//! Prompt and logging configuration (`[prompts]` and `[logging]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory holding `chat.md` / `diagnose.md` overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptsConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// `EnvFilter` directive used when neither `-v` nor `RUST_LOG` is given
    pub level: Option<String>,
    /// Also write logs to this file
    pub file: Option<PathBuf>,
}
