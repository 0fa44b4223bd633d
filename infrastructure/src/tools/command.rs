//! External-command tool handler
//!
//! Runs a configured program, writes the JSON arguments to its stdin and
//! returns its stdout. Output that parses as JSON is returned structured,
//! anything else as text.

use super::registry::ToolHandler;
use async_trait::async_trait;
use pcai_domain::ToolError;
use serde_json::{Map, Value};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Maximum stdout kept from one run (1 MB)
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

/// Handler invoking an external program.
#[derive(Debug, Clone)]
pub struct CommandTool {
    program: String,
    args: Vec<String>,
}

impl CommandTool {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl ToolHandler for CommandTool {
    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        let input = Value::Object(arguments.clone()).to_string();
        debug!(program = %self.program, args = ?self.args, "Spawning tool command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ToolError::execution_failed(format!("failed to start '{}': {}", self.program, e))
            })?;

        // Feed stdin while draining stdout, or a chatty child blocks on a full pipe.
        let stdin = child.stdin.take();
        let write = async move {
            if let Some(mut stdin) = stdin {
                // A program that ignores stdin may close it early; that is not an error.
                if let Err(e) = stdin.write_all(input.as_bytes()).await {
                    debug!(error = %e, "Tool command closed stdin before reading all arguments");
                }
            }
        };
        let ((), output) = tokio::join!(write, child.wait_with_output());
        let output = output.map_err(|e| {
            ToolError::execution_failed(format!("failed to wait for '{}': {}", self.program, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            return Err(ToolError::execution_failed(format!(
                "'{}' exited with {}",
                self.program, code
            ))
            .with_details(stderr));
        }

        let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.len() > MAX_OUTPUT_SIZE {
            let mut cut = MAX_OUTPUT_SIZE;
            while !stdout.is_char_boundary(cut) {
                cut -= 1;
            }
            stdout.truncate(cut);
        }
        let trimmed = stdout.trim();
        Ok(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
    }
}
