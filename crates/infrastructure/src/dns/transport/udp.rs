use super::{map_io_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_recon_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP. A fresh connected socket per query, so ICMP port
/// unreachable surfaces as a refused connection.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| map_io_error(self.server_addr, "Failed to bind UDP socket for", e))?;
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| map_io_error(self.server_addr, "Failed to connect UDP socket to", e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| map_io_error(self.server_addr, "Failed to send UDP query to", e))?;

        debug!(server = %self.server_addr, bytes_sent = bytes_sent, "UDP query sent");

        let expected_id = message_id(message_bytes);
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        // Stray datagrams with another ID are skipped; the caller's timeout
        // bounds the wait.
        loop {
            let bytes_received = socket.recv(&mut recv_buf).await.map_err(|e| {
                map_io_error(self.server_addr, "Failed to receive UDP response from", e)
            })?;

            if bytes_received >= 2 && message_id(&recv_buf[..bytes_received]) == expected_id {
                recv_buf.truncate(bytes_received);
                debug!(
                    server = %self.server_addr,
                    bytes_received = bytes_received,
                    "UDP response received"
                );
                return Ok(recv_buf);
            }

            debug!(server = %self.server_addr, "Ignoring UDP datagram with mismatched ID");
        }
    }
}

pub(crate) fn message_id(bytes: &[u8]) -> Option<u16> {
    match bytes {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| {
                DomainError::Timeout(format!(
                    "No UDP response from {} within {:?}",
                    self.server_addr, timeout
                ))
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }
}
