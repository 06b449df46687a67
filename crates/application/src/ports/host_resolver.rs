use async_trait::async_trait;
use pod_dns_domain::DomainError;
use std::net::Ipv4Addr;

/// Resolution through the machine's own resolver, honoring its search list
/// and ndots settings.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve_addresses(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError>;
}
