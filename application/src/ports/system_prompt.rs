//! System prompt port
//!
//! Supplies the mode-specific system prompt for the primary model.

use pcai_domain::Mode;

/// Built-in chat prompt.
pub const DEFAULT_CHAT_PROMPT: &str = "You are PC_AI, a local PC diagnostics assistant. \
Answer the user's question about their Windows PC clearly and concisely. \
When tool results are provided, base your answer on them and say which results you used. \
If the results are insufficient, say what additional information would help.";

/// Built-in diagnose prompt.
pub const DEFAULT_DIAGNOSE_PROMPT: &str = "You are PC_AI, a local PC diagnostics assistant. \
Analyze the user's problem and any tool results provided. \
Respond with a single JSON object and nothing else, using exactly these fields:\n\
{\n  \"summary\": \"one-paragraph assessment\",\n  \
\"findings\": [{\"category\": \"...\", \"severity\": \"info|warning|critical\", \"detail\": \"...\"}],\n  \
\"recommendations\": [\"ordered, actionable steps\"]\n}\n\
Do not wrap the JSON in markdown fences.";

/// Source of system prompts.
pub trait SystemPromptPort: Send + Sync {
    fn system_prompt(&self, mode: Mode) -> String;
}

/// The built-in prompts, used when no prompt files are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPrompts;

impl BuiltinPrompts {
    pub fn for_mode(mode: Mode) -> &'static str {
        match mode {
            Mode::Chat => DEFAULT_CHAT_PROMPT,
            Mode::Diagnose => DEFAULT_DIAGNOSE_PROMPT,
        }
    }
}

impl SystemPromptPort for BuiltinPrompts {
    fn system_prompt(&self, mode: Mode) -> String {
        Self::for_mode(mode).to_string()
    }
}
