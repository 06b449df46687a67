use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Generic resolution failure; carries the underlying error text.
    #[error("Resolution failed: {0}")]
    Resolution(String),

    /// The responder deliberately has no data for this name.
    #[error("Authoritative: {0}")]
    Authoritative(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Domain not found (NXDOMAIN)")]
    NxDomain,

    #[error("Query refused by {server}")]
    Refused { server: String },

    #[error("Upstream {server} answered {rcode}")]
    UpstreamFailure { server: String, rcode: String },

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("No upstream servers configured")]
    NoUpstreamServers,
}

impl DomainError {
    /// Timeouts at any layer are treated the same by the resolution engine.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            DomainError::QueryTimeout | DomainError::TransportTimeout { .. }
        )
    }

    pub fn is_authoritative(&self) -> bool {
        matches!(self, DomainError::Authoritative(_))
    }
}
