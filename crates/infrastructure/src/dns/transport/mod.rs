pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use ferrous_recon_domain::{DomainError, Transport as TransportKind};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
    /// Which protocol was used
    pub protocol_used: &'static str,
}

/// Trait for sending raw DNS messages over the wire
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;
}

/// Enum-dispatched transport, one per attempt.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }
}

pub fn create_transport(kind: TransportKind, addr: SocketAddr) -> Transport {
    match kind {
        TransportKind::Udp => Transport::Udp(udp::UdpTransport::new(addr)),
        TransportKind::Tcp => Transport::Tcp(tcp::TcpTransport::new(addr)),
    }
}

/// Socket errors split into refused connections and everything else.
pub(crate) fn map_io_error(server: SocketAddr, action: &str, e: io::Error) -> DomainError {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => {
            DomainError::ConnectionRefused(format!("{} {}: {}", action, server, e))
        }
        io::ErrorKind::TimedOut => DomainError::Timeout(format!("{} {}: {}", action, server, e)),
        _ => DomainError::TransportError(format!("{} {}: {}", action, server, e)),
    }
}
