use async_trait::async_trait;
use pod_dns_application::ports::HostResolver;
use pod_dns_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Resolves names with the C library resolver (`getaddrinfo`), so the pod's
/// search list and ndots setting apply.
///
/// Each lookup blocks a worker thread; the semaphore bounds how many run at
/// once.
pub struct SystemHostResolver {
    permits: Arc<Semaphore>,
}

impl SystemHostResolver {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    fn lookup(hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        let resolved = (hostname, 0)
            .to_socket_addrs()
            .map_err(|e| DomainError::Resolution(e.to_string()))?;

        let mut addresses: Vec<Ipv4Addr> = Vec::new();
        for addr in resolved {
            if let IpAddr::V4(ip) = addr.ip() {
                if !addresses.contains(&ip) {
                    addresses.push(ip);
                }
            }
        }

        if addresses.is_empty() {
            return Err(DomainError::Resolution(format!(
                "no IPv4 address for {}",
                hostname
            )));
        }
        Ok(addresses)
    }
}

#[async_trait]
impl HostResolver for SystemHostResolver {
    async fn resolve_addresses(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| DomainError::Resolution(e.to_string()))?;

        let owned = hostname.to_string();
        let addresses = tokio::task::spawn_blocking(move || Self::lookup(&owned))
            .await
            .map_err(|e| DomainError::Resolution(format!("lookup task failed: {}", e)))??;

        debug!(hostname = %hostname, addresses = ?addresses, "Host resolver answered");
        Ok(addresses)
    }
}
