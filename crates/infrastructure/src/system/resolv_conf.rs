use pod_dns_domain::config::resolver::parse_nameserver;
use pod_dns_domain::DomainError;
use std::net::SocketAddr;
use tracing::warn;

/// The parts of a resolver configuration file the responder cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvConf {
    pub nameservers: Vec<SocketAddr>,
    /// Raw `search` lines, keyword removed
    pub search: Vec<String>,
}

impl ResolvConf {
    pub fn read(path: &str) -> Result<Self, DomainError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::IoError(format!("Failed to read {}: {}", path, e)))?;
        Ok(Self::parse(&content))
    }

    /// Parse resolv.conf syntax. Keywords are case-insensitive; unparsable
    /// nameserver entries are skipped.
    pub fn parse(content: &str) -> Self {
        let mut conf = Self::default();

        for line in content.lines() {
            let mut fields = line.split_whitespace();
            let Some(keyword) = fields.next() else {
                continue;
            };

            if keyword.eq_ignore_ascii_case("nameserver") {
                let Some(address) = fields.next() else {
                    continue;
                };
                match parse_nameserver(address) {
                    Ok(addr) => conf.nameservers.push(addr),
                    Err(e) => warn!(error = %e, "Skipping nameserver entry"),
                }
            } else if keyword.eq_ignore_ascii_case("search") {
                let domains: Vec<&str> = fields.collect();
                conf.search.push(domains.join(" "));
            }
        }

        conf
    }

    pub fn first_nameserver(&self) -> Option<SocketAddr> {
        self.nameservers.first().copied()
    }
}
