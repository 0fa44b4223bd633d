//! Use cases (application services)
//!
//! - [`fallback_chat`]: ordered provider dispatch with health caching
//! - [`route_tools`]: router model ReAct loop
//! - [`routed_chat`]: one-shot request orchestration
//! - [`chat_session`]: interactive conversation on top of the orchestrator

pub mod chat_session;
pub mod fallback_chat;
pub mod route_tools;
pub mod routed_chat;
pub mod text_tool_calls;
