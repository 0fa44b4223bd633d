//! Core domain concepts shared across all subdomains.
//!
//! - [`clock::Clock`]: injectable time source used for TTL decisions
//! - [`error::DomainError`]: domain-level errors

pub mod clock;
pub mod error;
