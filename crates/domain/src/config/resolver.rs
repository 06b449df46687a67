use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Resolution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Nameserver supplied by the client side when a tunnel captures DNS
    /// traffic (e.g. "10.0.0.2" or "10.0.0.2:53").
    /// Setting it switches the responder into tunnel mode.
    #[serde(default)]
    pub tunnel_nameserver: Option<String>,

    /// Pod namespace used to complete single-label service names.
    /// Discovered at startup when not set.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Names always treated as cluster-internal, regardless of shape
    #[serde(default)]
    pub local_names: Vec<String>,

    /// Resolver configuration of the pod itself
    #[serde(default = "default_resolv_conf_path")]
    pub resolv_conf_path: String,

    /// Per-attempt timeout used when the caller gives none
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Rounds over the fallback nameservers before giving up
    #[serde(default = "default_fallback_attempts")]
    pub fallback_attempts: usize,

    /// Cluster DNS is expected to be fast; a short timeout keeps the
    /// fallback path responsive.
    #[serde(default = "default_cluster_timeout_ms")]
    pub cluster_timeout_ms: u64,

    /// Per-attempt timeout when re-resolving a name with its search suffix
    /// stripped
    #[serde(default = "default_stripped_retry_timeout_ms")]
    pub stripped_retry_timeout_ms: u64,

    /// Maximum concurrent lookups through the system resolver
    #[serde(default = "default_native_concurrency")]
    pub native_concurrency: usize,
}

impl ResolverConfig {
    pub fn is_tunnel_mode(&self) -> bool {
        self.tunnel_nameserver.is_some()
    }

    /// Parse the tunnel nameserver, defaulting the port to 53.
    pub fn tunnel_nameserver_addr(&self) -> Option<Result<SocketAddr, String>> {
        self.tunnel_nameserver
            .as_deref()
            .map(parse_nameserver)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn cluster_timeout(&self) -> Duration {
        Duration::from_millis(self.cluster_timeout_ms)
    }

    pub fn stripped_retry_timeout(&self) -> Duration {
        Duration::from_millis(self.stripped_retry_timeout_ms)
    }
}

/// Parse `ip`, `ip:port` or `[v6]:port` into a socket address.
pub fn parse_nameserver(value: &str) -> Result<SocketAddr, String> {
    let value = value.trim();
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    value
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|e| format!("invalid nameserver '{}': {}", value, e))
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tunnel_nameserver: None,
            namespace: None,
            local_names: vec![],
            resolv_conf_path: default_resolv_conf_path(),
            query_timeout_ms: default_query_timeout_ms(),
            fallback_attempts: default_fallback_attempts(),
            cluster_timeout_ms: default_cluster_timeout_ms(),
            stripped_retry_timeout_ms: default_stripped_retry_timeout_ms(),
            native_concurrency: default_native_concurrency(),
        }
    }
}

fn default_resolv_conf_path() -> String {
    "/etc/resolv.conf".to_string()
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_fallback_attempts() -> usize {
    2
}

fn default_cluster_timeout_ms() -> u64 {
    100
}

fn default_stripped_retry_timeout_ms() -> u64 {
    1000
}

fn default_native_concurrency() -> usize {
    50
}
