//! System prompt sources

pub mod loader;

pub use loader::FilePromptLoader;
