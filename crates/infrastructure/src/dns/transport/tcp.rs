//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Each message is prefixed with its length as a big-endian u16. One
//! connection per query; TCP is only used after a truncated UDP answer.

use super::{io_error, timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use pod_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr;
        let length = u16::try_from(message_bytes.len()).map_err(|_| DomainError::Transport {
            server: server.to_string(),
            reason: format!("message too large: {} bytes", message_bytes.len()),
        })?;

        let exchange = async {
            let mut stream = TcpStream::connect(server)
                .await
                .map_err(|e| io_error(server, "connect", e))?;
            stream
                .set_nodelay(true)
                .map_err(|e| io_error(server, "set TCP_NODELAY", e))?;

            send_with_length_prefix(&mut stream, length, message_bytes)
                .await
                .map_err(|e| io_error(server, "send TCP query", e))?;
            read_with_length_prefix(&mut stream)
                .await
                .map_err(|e| io_error(server, "read TCP response", e))
        };

        let bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| timeout_error(server))??;

        debug!(
            server = %server,
            response_len = bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse { bytes })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    length: u16,
    message_bytes: &[u8],
) -> std::io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> std::io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let mut response = vec![0u8; usize::from(u16::from_be_bytes(len_buf))];
    stream.read_exact(&mut response).await?;
    Ok(response)
}
