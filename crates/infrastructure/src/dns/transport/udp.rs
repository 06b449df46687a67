//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). If the response has the TC
//! (truncated) bit set, the caller retries over TCP.

use super::{io_error, timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use pod_dns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr;

        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| io_error(server, "bind UDP socket", e))?;

        // Connected socket: the kernel drops datagrams from other sources.
        socket
            .connect(server)
            .await
            .map_err(|e| io_error(server, "connect UDP socket", e))?;

        let exchange = async {
            socket
                .send(message_bytes)
                .await
                .map_err(|e| io_error(server, "send UDP query", e))?;

            let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
            let received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| io_error(server, "receive UDP response", e))?;
            recv_buf.truncate(received);
            Ok::<_, DomainError>(recv_buf)
        };

        let bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| timeout_error(server))??;

        debug!(
            server = %server,
            bytes_received = bytes.len(),
            "UDP response received"
        );

        Ok(TransportResponse { bytes })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
