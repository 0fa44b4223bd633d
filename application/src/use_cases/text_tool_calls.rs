//! `callTool(name, args)` recognition in free-form model output.
//!
//! Some local models cannot emit structured `tool_calls` and instead write
//! `callTool("pcai_get_disk_health", {"drive": "C:"})` into their reply.
//! Recognized calls are turned into regular [`ToolCall`] values.

use pcai_domain::{ToolArguments, ToolCall, ToolResult};
use regex::Regex;
use std::sync::LazyLock;

static TEXT_TOOL_CALL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?s)callTool\(\s*["']([A-Za-z0-9_.\-]+)["']\s*(?:,\s*(\{.*?\}))?\s*\)"#).ok()
});

/// Every `callTool(...)` occurrence in `text`, in order of appearance.
pub fn parse_text_tool_calls(text: &str) -> Vec<ToolCall> {
    let Some(re) = TEXT_TOOL_CALL.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .enumerate()
        .map(|(i, caps)| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let args = caps
                .get(2)
                .map(|m| ToolArguments::Raw(m.as_str().to_string()))
                .unwrap_or_default();
            ToolCall::new(format!("text-call-{}", i + 1), name, args)
        })
        .collect()
}

/// User message feeding text-channel tool results back to the model.
pub fn format_text_tool_results(results: &[ToolResult]) -> String {
    let block = serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string());
    format!("Tool results for your callTool requests (JSON):\n{block}\nUse them to answer the original question.")
}
