//! CLI command definitions

use clap::{Parser, Subcommand};
use pcai_domain::Mode;
use std::path::PathBuf;

/// CLI arguments for pcai
#[derive(Parser, Debug)]
#[command(name = "pcai")]
#[command(author, version, about = "PC diagnostics assistant with tool routing and provider fallback")]
#[command(long_about = r#"
pcai answers questions about this PC. A small router model picks diagnostic
tools, their results are attached to the prompt, and the answer comes from the
first healthy provider in the configured chain.

Configuration is merged from (lowest to highest priority):
1. built-in defaults
2. ~/.config/pcai/config.toml   Global config
3. ./pcai.toml                  Project-level config
4. --config <path>              Explicit config file
5. PCAI_* environment variables (e.g. PCAI_ROUTING__MAX_TOOL_CALLS=5)

Example:
  pcai ask "Why is my disk so slow?"
  pcai ask --mode diagnose --json "Check USB controller errors"
  pcai chat --no-router
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Answer format: chat (free text) or diagnose (JSON report)
    #[arg(long, global = true, default_value = "chat", value_name = "MODE")]
    pub mode: Mode,

    /// Use only this configured provider instead of the fallback chain
    #[arg(long, global = true, value_name = "ID")]
    pub provider: Option<String>,

    /// Model override for the primary call
    #[arg(short, long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Skip the tool router entirely
    #[arg(long, global = true)]
    pub no_router: bool,

    /// Accept non-JSON answers in diagnose mode
    #[arg(long, global = true)]
    pub no_json_enforce: bool,

    /// Run without a tool catalog
    #[arg(long, global = true)]
    pub no_tools: bool,

    /// Print the full response record as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a single question
    Ask {
        /// The question (multiple words are joined)
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Start an interactive chat session
    Chat,
}
