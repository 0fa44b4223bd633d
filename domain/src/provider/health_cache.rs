//! TTL-bounded cache of provider reachability.
//!
//! Remembers the last known health of each provider for a short interval so
//! that callers can skip a network probe when reachability is already known.
//!
//! An entry older than the TTL is reported as absent (`None`), never as
//! healthy or unhealthy. Writes are last-writer-wins; a stale read only costs
//! one extra probe.

use crate::core::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default validity of a cached health result.
pub const DEFAULT_HEALTH_TTL: Duration = Duration::from_secs(30);

/// A single cached health observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthEntry {
    pub healthy: bool,
    pub cached_at: DateTime<Utc>,
}

/// Process-wide provider health cache keyed by provider id.
pub struct ProviderHealthCache {
    entries: Mutex<HashMap<String, HealthEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ProviderHealthCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached health of `provider_id`, or `None` when absent or expired.
    pub fn get(&self, provider_id: &str) -> Option<bool> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(provider_id)?;
        if self.is_expired(entry) {
            None
        } else {
            Some(entry.healthy)
        }
    }

    /// Record the health of `provider_id` as observed now.
    pub fn set(&self, provider_id: &str, healthy: bool) {
        let entry = HealthEntry {
            healthy,
            cached_at: self.clock.now(),
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(provider_id.to_string(), entry);
        }
    }

    /// Drop every cached entry.
    pub fn reset(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Whether the provider is known to be unhealthy right now.
    pub fn is_known_unhealthy(&self, provider_id: &str) -> bool {
        self.get(provider_id) == Some(false)
    }

    fn is_expired(&self, entry: &HealthEntry) -> bool {
        // A cached_at in the future (clock skew) counts as age zero.
        let age = (self.clock.now() - entry.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        age >= self.ttl
    }
}

impl Default for ProviderHealthCache {
    fn default() -> Self {
        Self::new(DEFAULT_HEALTH_TTL)
    }
}

impl std::fmt::Debug for ProviderHealthCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.entries.lock().map(|e| e.len()).unwrap_or(0);
        f.debug_struct("ProviderHealthCache")
            .field("ttl", &self.ttl)
            .field("entries", &count)
            .finish()
    }
}
