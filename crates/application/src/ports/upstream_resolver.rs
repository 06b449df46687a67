use async_trait::async_trait;
use pod_dns_domain::{AnswerSet, DnsQuery, DomainError};
use std::time::Duration;

/// A nameserver the engine can hand a query to.
///
/// Both the cluster resolver and the fallback resolver implement this; they
/// differ only in the servers they talk to.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Send `query` upstream. `timeout` applies to each attempt.
    async fn query(&self, query: &DnsQuery, timeout: Duration) -> Result<AnswerSet, DomainError>;
}
