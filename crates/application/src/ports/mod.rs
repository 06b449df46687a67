mod host_resolver;
mod upstream_resolver;

pub use host_resolver::HostResolver;
pub use upstream_resolver::UpstreamResolver;

// Re-export for convenience
pub use pod_dns_domain::{AnswerSet, DnsQuery};
