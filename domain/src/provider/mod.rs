//! Provider domain module
//!
//! A [`Provider`] is a named backend implementing the OpenAI-compatible
//! chat-completions API. Providers are configured as an ordered list; the
//! [`ProviderHealthCache`] remembers which of them were recently reachable so
//! that fallback dispatch can skip known-bad backends without a probe.

pub mod entities;
pub mod health_cache;

pub use entities::{Provider, endpoint_url};
pub use health_cache::{DEFAULT_HEALTH_TTL, HealthEntry, ProviderHealthCache};
