//! Nameserver-backed upstream resolver.
//!
//! Used for both the cluster nameserver and the fallback nameservers.

use super::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use super::transport::Transport;
use async_trait::async_trait;
use pod_dns_application::ports::UpstreamResolver;
use pod_dns_domain::{AnswerSet, DnsQuery, DomainError};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

pub struct NameserverResolver {
    label: &'static str,
    servers: Vec<SocketAddr>,
    attempts: usize,
}

impl NameserverResolver {
    /// `attempts` rounds over `servers`, in order.
    pub fn new(label: &'static str, servers: Vec<SocketAddr>, attempts: usize) -> Self {
        Self {
            label,
            servers,
            attempts: attempts.max(1),
        }
    }

    async fn exchange(
        &self,
        transport: Transport,
        server: SocketAddr,
        id: u16,
        bytes: &[u8],
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        let response = transport.send(bytes, timeout).await?;
        let parsed = ResponseParser::parse(&response.bytes)?;
        if parsed.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} response from {} has ID {} (expected {})",
                transport.protocol_name(),
                server,
                parsed.id,
                id
            )));
        }
        Ok(parsed)
    }

    async fn query_server(
        &self,
        server: SocketAddr,
        query: &DnsQuery,
        timeout: Duration,
    ) -> Result<AnswerSet, DomainError> {
        let (id, bytes) = MessageBuilder::build_query(query)?;

        let mut response = self
            .exchange(Transport::udp(server), server, id, &bytes, timeout)
            .await?;

        if response.truncated {
            debug!(server = %server, domain = %query.domain, "Truncated UDP response, retrying over TCP");
            response = self
                .exchange(Transport::tcp(server), server, id, &bytes, timeout)
                .await?;
        }

        response.into_answer_set(server)
    }
}

#[async_trait]
impl UpstreamResolver for NameserverResolver {
    async fn query(&self, query: &DnsQuery, timeout: Duration) -> Result<AnswerSet, DomainError> {
        let mut last_error = DomainError::NoUpstreamServers;

        for attempt in 1..=self.attempts {
            for &server in &self.servers {
                match self.query_server(server, query, timeout).await {
                    Ok(answers) => {
                        debug!(
                            resolver = self.label,
                            server = %server,
                            domain = %query.domain,
                            record_type = %query.record_type,
                            answers = answers.answers.len(),
                            "Upstream answered"
                        );
                        return Ok(answers);
                    }
                    // The name does not exist; another server will not say otherwise.
                    Err(DomainError::NxDomain) => return Err(DomainError::NxDomain),
                    Err(e) => {
                        debug!(
                            resolver = self.label,
                            server = %server,
                            attempt,
                            domain = %query.domain,
                            error = %e,
                            "Upstream attempt failed"
                        );
                        last_error = e;
                    }
                }
            }
        }

        Err(last_error)
    }
}
