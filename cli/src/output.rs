//! Console output for routed responses

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pcai_application::ChatTurn;
use pcai_domain::RoutedResponse;
use std::time::Duration;

pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Full response record as pretty JSON.
    pub fn format_json(response: &RoutedResponse) -> serde_json::Result<String> {
        serde_json::to_string_pretty(response)
    }

    /// One-line summary printed to stderr after the answer.
    pub fn status_line(response: &RoutedResponse) -> String {
        let mut parts = vec![
            format!("{} {}", "provider:".dimmed(), response.provider),
            format!("{} {}", "model:".dimmed(), response.model),
            format!("{} {}", "tools:".dimmed(), response.tool_results.len()),
            format!(
                "{} {}",
                "router:".dimmed(),
                Self::router_state(response.router_available, response.degraded)
            ),
        ];
        if response.json_error.is_some() {
            parts.push("json: invalid".yellow().to_string());
        }
        parts.push(format!("{}ms", response.elapsed_ms).dimmed().to_string());
        parts.join("  ")
    }

    pub fn turn_status(turn: &ChatTurn) -> String {
        let mut line = format!(
            "{} {}  {} {}  {} {}  {} {}",
            "provider:".dimmed(),
            turn.provider,
            "model:".dimmed(),
            turn.model,
            "tools:".dimmed(),
            turn.outcome.tool_results.len(),
            "router:".dimmed(),
            Self::router_state(turn.outcome.router_available, turn.outcome.degraded),
        );
        if !turn.text_tool_results.is_empty() {
            line.push_str(&format!(
                "  {} {}",
                "reply tools:".dimmed(),
                turn.text_tool_results.len()
            ));
        }
        if turn.json_error.is_some() {
            line.push_str(&format!("  {}", "json: invalid".yellow()));
        }
        line
    }

    fn router_state(available: bool, degraded: bool) -> colored::ColoredString {
        match (available, degraded) {
            (true, _) => "ok".green(),
            (false, true) => "degraded".yellow(),
            (false, false) => "off".normal(),
        }
    }
}

/// Spinner on stderr while a request runs. Hidden when disabled.
pub fn spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
