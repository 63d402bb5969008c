use ferrous_recon_domain::{AnswerRecord, DnsAnswer, DomainError, ResponseCode};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

use super::forwarding::ResponseParser;
use super::transport::tcp::TcpTransport;

/// Streams one AXFR over TCP: a request, then length-prefixed messages until
/// the SOA that closes the zone.
pub struct AxfrReader {
    transport: TcpTransport,
    timeout: Duration,
}

impl AxfrReader {
    /// `timeout` bounds the connect and every single read, not the whole
    /// transfer.
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self {
            transport: TcpTransport::new(server),
            timeout,
        }
    }

    pub async fn transfer(&self, id: u16, request: &[u8]) -> Result<DnsAnswer, DomainError> {
        let server = self.transport.server_addr();
        let mut stream = self.bounded(self.transport.connect()).await?;
        self.bounded(self.transport.write_message(&mut stream, request))
            .await?;

        let mut records: Vec<AnswerRecord> = Vec::new();
        let mut soa_seen = 0usize;
        let mut messages = 0usize;

        loop {
            let bytes = self.bounded(self.transport.read_message(&mut stream)).await?;
            let response = ResponseParser::parse(&bytes)?;
            messages += 1;

            if response.id != id {
                return Err(DomainError::NoResponse(format!(
                    "AXFR reply from {} has mismatched ID",
                    server
                )));
            }
            if response.is_refused() {
                return Err(DomainError::NoResponse(format!(
                    "AXFR refused by {}: {}",
                    server, response.rcode
                )));
            }
            if response.rcode != ResponseCode::NoError {
                return Err(DomainError::NoResponse(format!(
                    "AXFR failed at {}: {}",
                    server, response.rcode
                )));
            }
            if messages == 1 && response.answers.is_empty() {
                return Ok(DnsAnswer::new(response.rcode, Vec::new()));
            }

            for record in response.answers {
                if record.data.is_soa() {
                    soa_seen += 1;
                }
                records.push(record);
                if soa_seen == 2 {
                    debug!(server = %server, records = records.len(), messages, "AXFR complete");
                    return Ok(DnsAnswer::new(ResponseCode::NoError, records));
                }
            }
        }
    }

    async fn bounded<T, F>(&self, step: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        tokio::time::timeout(self.timeout, step).await.map_err(|_| {
            DomainError::Timeout(format!(
                "AXFR from {} stalled for {:?}",
                self.transport.server_addr(),
                self.timeout
            ))
        })?
    }
}
