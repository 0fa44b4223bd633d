//! Health probe port

use async_trait::async_trait;
use pcai_domain::Provider;
use std::time::Duration;

/// Provider-specific reachability check (e.g. listing models).
///
/// Never fails: any error or timeout is reported as `false`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, provider: &Provider, timeout: Duration) -> bool;
}
