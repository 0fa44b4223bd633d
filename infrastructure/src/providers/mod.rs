//! LLM provider adapters
//!
//! [`OpenAiCompatibleGateway`] implements both the `LlmGateway` and the
//! `HealthProbe` ports for every OpenAI-compatible backend.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatibleGateway;
