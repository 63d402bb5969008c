use async_trait::async_trait;
use ferrous_recon_domain::{QueryOutcome, QueryTarget, ResolverConfig};
use std::net::IpAddr;
use std::time::Duration;

/// Single-query DNS client.
///
/// Implementations never return an error or panic for a failed query: every
/// problem is folded into [`QueryOutcome::Failure`].
#[async_trait]
pub trait DnsQuerier: Send + Sync {
    /// Resolve one target, applying the transport, timeout and retry policy
    /// of `config`.
    async fn query(&self, target: &QueryTarget, config: &ResolverConfig) -> QueryOutcome;

    /// Longest a single `query` may take under `config`, counting every
    /// server an attempt walks.
    async fn worst_case(&self, config: &ResolverConfig) -> Duration {
        config.worst_case_duration()
    }

    /// Request a full zone transfer of `domain`, trying each of `servers` in
    /// order over TCP.
    async fn transfer_zone(
        &self,
        domain: &str,
        servers: &[IpAddr],
        config: &ResolverConfig,
    ) -> QueryOutcome;
}
