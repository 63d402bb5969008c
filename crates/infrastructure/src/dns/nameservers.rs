use ferrous_recon_domain::{DomainError, ResolverConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;

pub const DNS_PORT: u16 = 53;

const RESOLV_CONF: &str = "/etc/resolv.conf";

/// Used when the system has no usable resolver configured.
pub const FALLBACK_RESOLVERS: [IpAddr; 2] = [
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
    IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
];

/// Decides which servers a query goes to: the configured override, or the
/// system resolvers.
pub struct NameserverSelector {
    resolv_conf: PathBuf,
    system: OnceLock<Vec<SocketAddr>>,
}

impl Default for NameserverSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl NameserverSelector {
    pub fn new() -> Self {
        Self {
            resolv_conf: PathBuf::from(RESOLV_CONF),
            system: OnceLock::new(),
        }
    }

    pub fn with_resolv_conf(mut self, path: impl Into<PathBuf>) -> Self {
        self.resolv_conf = path.into();
        self
    }

    pub async fn servers(&self, config: &ResolverConfig) -> Result<Vec<SocketAddr>, DomainError> {
        match config.nameserver.as_deref() {
            Some(raw) => parse_override(raw).await,
            None => Ok(self.system_servers().to_vec()),
        }
    }

    /// System resolvers, read once per selector.
    pub fn system_servers(&self) -> &[SocketAddr] {
        self.system.get_or_init(|| {
            let configured = std::fs::read_to_string(&self.resolv_conf)
                .map(|content| parse_resolv_conf(&content))
                .unwrap_or_default();

            let servers = if configured.is_empty() {
                FALLBACK_RESOLVERS.to_vec()
            } else {
                configured
            };

            debug!(servers = ?servers, "System resolvers selected");
            servers
                .into_iter()
                .map(|ip| SocketAddr::new(ip, DNS_PORT))
                .collect()
        })
    }
}

/// Accepts `ip`, `ip:port`, `[v6]:port`, `host` or `host:port`. Hostnames go
/// through the OS resolver. Anything that cannot be turned into an address
/// is a configuration error.
pub async fn parse_override(raw: &str) -> Result<Vec<SocketAddr>, DomainError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::ConfigError("nameserver is blank".to_string()));
    }

    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return Ok(vec![addr]);
    }

    let bare = raw.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, DNS_PORT)]);
    }

    let resolved: Vec<SocketAddr> = match raw.rsplit_once(':') {
        Some((host, port)) => {
            let port: u16 = port.parse().map_err(|_| {
                DomainError::ConfigError(format!("Invalid nameserver port in '{}'", raw))
            })?;
            tokio::net::lookup_host((host, port)).await
        }
        None => tokio::net::lookup_host((raw, DNS_PORT)).await,
    }
    .map_err(|e| DomainError::ConfigError(format!("Cannot resolve nameserver '{}': {}", raw, e)))?
    .collect();

    if resolved.is_empty() {
        return Err(DomainError::ConfigError(format!(
            "Nameserver '{}' has no address",
            raw
        )));
    }
    Ok(resolved)
}

/// `nameserver` entries of a resolv.conf, in file order. Zone indices
/// (`fe80::1%eth0`) are dropped.
pub fn parse_resolv_conf(content: &str) -> Vec<IpAddr> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.split(['#', ';']).next()?.trim();
            let mut fields = line.split_whitespace();
            if fields.next()? != "nameserver" {
                return None;
            }
            let address = fields.next()?;
            let address = address.split('%').next()?;
            address.parse::<IpAddr>().ok()
        })
        .collect()
}
