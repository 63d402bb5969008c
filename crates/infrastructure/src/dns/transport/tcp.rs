use super::{map_io_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_recon_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP (RFC 1035 §4.2.2): every message is prefixed with its
/// length as a big-endian u16.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub async fn connect(&self) -> Result<TcpStream, DomainError> {
        let stream = TcpStream::connect(self.server_addr)
            .await
            .map_err(|e| map_io_error(self.server_addr, "Failed to connect to", e))?;
        let _ = stream.set_nodelay(true);
        Ok(stream)
    }

    pub async fn write_message(
        &self,
        stream: &mut TcpStream,
        message_bytes: &[u8],
    ) -> Result<(), DomainError> {
        let len = u16::try_from(message_bytes.len()).map_err(|_| {
            DomainError::InvalidDnsResponse(format!(
                "DNS message too large for TCP framing: {} bytes",
                message_bytes.len()
            ))
        })?;

        let mut framed = Vec::with_capacity(message_bytes.len() + 2);
        framed.extend_from_slice(&len.to_be_bytes());
        framed.extend_from_slice(message_bytes);

        stream
            .write_all(&framed)
            .await
            .map_err(|e| map_io_error(self.server_addr, "Failed to send TCP query to", e))
    }

    /// Reads one length-prefixed message. A stream closed before a full
    /// message arrived is `NoResponse`.
    pub async fn read_message(&self, stream: &mut TcpStream) -> Result<Vec<u8>, DomainError> {
        let mut len_buf = [0u8; 2];
        stream
            .read_exact(&mut len_buf)
            .await
            .map_err(|e| self.read_error(e))?;

        let len = u16::from_be_bytes(len_buf) as usize;
        let mut body = vec![0u8; len];
        stream
            .read_exact(&mut body)
            .await
            .map_err(|e| self.read_error(e))?;

        debug!(server = %self.server_addr, bytes_received = len, "TCP message received");
        Ok(body)
    }

    fn read_error(&self, e: io::Error) -> DomainError {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            DomainError::NoResponse(format!("{} closed the connection", self.server_addr))
        } else {
            map_io_error(self.server_addr, "Failed to read TCP response from", e)
        }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut stream = self.connect().await?;
        self.write_message(&mut stream, message_bytes).await?;
        self.read_message(&mut stream).await
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| {
                DomainError::Timeout(format!(
                    "No TCP response from {} within {:?}",
                    self.server_addr, timeout
                ))
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }
}
