use async_trait::async_trait;
use ferrous_recon_application::ports::DnsQuerier;
use ferrous_recon_domain::{
    DomainError, QueryOutcome, QueryTarget, RecordType, ResolverConfig, Transport as TransportKind,
};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

use super::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use super::nameservers::{NameserverSelector, DNS_PORT};
use super::reverse::ip_to_reverse_domain;
use super::transport::{create_transport, tcp::TcpTransport, DnsTransport};
use super::zone_transfer::AxfrReader;

/// [`DnsQuerier`] speaking DNS on the wire through `hickory-proto`.
///
/// Every attempt opens its own socket. Each attempt walks the server list in
/// order; attempts are separated by the configured retry interval.
pub struct WireQueryClient {
    selector: NameserverSelector,
    axfr_port: u16,
}

impl Default for WireQueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WireQueryClient {
    pub fn new() -> Self {
        Self {
            selector: NameserverSelector::new(),
            axfr_port: DNS_PORT,
        }
    }

    pub fn with_selector(mut self, selector: NameserverSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Port zone transfers are requested on.
    pub fn with_axfr_port(mut self, port: u16) -> Self {
        self.axfr_port = port;
        self
    }

    async fn resolve(
        &self,
        target: &QueryTarget,
        config: &ResolverConfig,
    ) -> Result<QueryOutcome, DomainError> {
        let servers = self.selector.servers(config).await?;
        let name = query_name(target);
        let (id, request) = MessageBuilder::build_query(&name, &target.record_type)?;

        let mut last_error = None;
        for attempt in 0..config.attempts() {
            if attempt > 0 {
                tokio::time::sleep(config.retry_interval()).await;
            }

            for server in &servers {
                match self.exchange(*server, id, &request, config).await {
                    Ok(response) => {
                        return Ok(QueryOutcome::from_answer(response.into_answer()));
                    }
                    Err(e) => {
                        debug!(
                            server = %server,
                            name = %name,
                            attempt,
                            error = %e,
                            "Query attempt failed"
                        );
                        last_error = Some(e);
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| DomainError::NoResponse(format!("No server answered for {}", name))))
    }

    async fn exchange(
        &self,
        server: SocketAddr,
        id: u16,
        request: &[u8],
        config: &ResolverConfig,
    ) -> Result<DnsResponse, DomainError> {
        let transport = create_transport(config.transport, server);
        let reply = transport.send(request, config.timeout()).await?;
        let response = Self::checked(id, &reply.bytes, server)?;
        debug!(
            server = %server,
            protocol = reply.protocol_used,
            answers = response.answers.len(),
            "Reply received"
        );

        if response.truncated && config.transport == TransportKind::Udp {
            debug!(server = %server, "Truncated UDP reply, retrying over TCP");
            let reply = TcpTransport::new(server)
                .send(request, config.timeout())
                .await?;
            return Self::checked(id, &reply.bytes, server);
        }

        Ok(response)
    }

    fn checked(id: u16, bytes: &[u8], server: SocketAddr) -> Result<DnsResponse, DomainError> {
        let response = ResponseParser::parse(bytes)?;
        if response.id != id {
            return Err(DomainError::NoResponse(format!(
                "Reply from {} has mismatched ID {} (expected {})",
                server, response.id, id
            )));
        }
        Ok(response)
    }

    async fn transfer(
        &self,
        domain: &str,
        servers: &[IpAddr],
        config: &ResolverConfig,
    ) -> Result<QueryOutcome, DomainError> {
        if servers.is_empty() {
            return Err(DomainError::ConfigError(format!(
                "No nameserver address to request {} from",
                domain
            )));
        }

        let (id, request) = MessageBuilder::build_axfr(domain)?;

        let mut last_error = None;
        for attempt in 0..config.attempts() {
            if attempt > 0 {
                tokio::time::sleep(config.retry_interval()).await;
            }

            for ip in servers {
                let server = SocketAddr::new(*ip, self.axfr_port);
                match AxfrReader::new(server, config.timeout())
                    .transfer(id, &request)
                    .await
                {
                    Ok(answer) => return Ok(QueryOutcome::from_answer(answer)),
                    Err(e) => {
                        debug!(
                            server = %server,
                            domain = %domain,
                            attempt,
                            error = %e,
                            "AXFR attempt failed"
                        );
                        last_error = Some(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DomainError::NoResponse(format!("No server transferred {}", domain))
        }))
    }
}

/// PTR queries for an IP literal go to its reverse-mapping name.
fn query_name(target: &QueryTarget) -> String {
    if target.record_type == RecordType::PTR {
        if let Ok(ip) = target.name.parse::<IpAddr>() {
            return ip_to_reverse_domain(&ip);
        }
    }
    target.name.to_string()
}

#[async_trait]
impl DnsQuerier for WireQueryClient {
    async fn query(&self, target: &QueryTarget, config: &ResolverConfig) -> QueryOutcome {
        self.resolve(target, config)
            .await
            .unwrap_or_else(|e| QueryOutcome::from_error(&e))
    }

    async fn worst_case(&self, config: &ResolverConfig) -> Duration {
        let servers = self
            .selector
            .servers(config)
            .await
            .map(|servers| servers.len())
            .unwrap_or(1);
        config.worst_case_duration_for(servers)
    }

    async fn transfer_zone(
        &self,
        domain: &str,
        servers: &[IpAddr],
        config: &ResolverConfig,
    ) -> QueryOutcome {
        self.transfer(domain, servers, config)
            .await
            .unwrap_or_else(|e| QueryOutcome::from_error(&e))
    }
}
