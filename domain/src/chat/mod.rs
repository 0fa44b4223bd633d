//! Chat domain module
//!
//! Messages and completion bodies exchanged with OpenAI-compatible providers.

pub mod completion;
pub mod message;

pub use completion::{ChatCompletion, ChatRequest, Choice, DEFAULT_TEMPERATURE};
pub use message::{ChatMessage, Role};
