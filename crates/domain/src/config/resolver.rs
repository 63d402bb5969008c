use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Wire transport used for ordinary queries. Zone transfers always use TCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Udp,
    Tcp,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Udp => "UDP",
            Transport::Tcp => "TCP",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "udp" => Ok(Transport::Udp),
            "tcp" => Ok(Transport::Tcp),
            _ => Err(format!("Invalid transport: {} (expected udp or tcp)", s)),
        }
    }
}

/// Settings applied to every query of an enumeration session.
///
/// Built once and shared read-only; nothing mutates it mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Nameserver to query instead of the system resolvers. Accepts an IP,
    /// an `ip:port` pair or a hostname; parsed at query time.
    #[serde(default)]
    pub nameserver: Option<String>,

    #[serde(default)]
    pub transport: Transport,

    /// Per-attempt timeout in seconds (default: 8)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after the first one when no response arrives (default: 2)
    #[serde(default = "default_retry")]
    pub retry: u32,

    /// Pause between attempts in seconds (default: 2)
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            nameserver: None,
            transport: Transport::Udp,
            timeout_secs: default_timeout_secs(),
            retry: default_retry(),
            retry_interval_secs: default_retry_interval_secs(),
        }
    }
}

impl ResolverConfig {
    pub fn with_nameserver(mut self, nameserver: impl Into<String>) -> Self {
        self.nameserver = Some(nameserver.into());
        self
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_retry(mut self, retry: u32, retry_interval_secs: u64) -> Self {
        self.retry = retry;
        self.retry_interval_secs = retry_interval_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    /// Total attempts per query (first try plus retries).
    pub fn attempts(&self) -> u32 {
        self.retry.saturating_add(1)
    }

    /// Upper bound on how long one query may block against a single server.
    pub fn worst_case_duration(&self) -> Duration {
        self.worst_case_duration_for(1)
    }

    /// Upper bound on how long one query may block when every attempt walks
    /// `servers` servers: each exchange timing out (twice over UDP, where a
    /// truncated reply is retried over TCP) plus every inter-attempt pause.
    pub fn worst_case_duration_for(&self, servers: usize) -> Duration {
        let per_exchange = match self.transport {
            Transport::Udp => self.timeout() * 2,
            Transport::Tcp => self.timeout(),
        };
        let servers = u32::try_from(servers.max(1)).unwrap_or(u32::MAX);
        per_exchange
            .saturating_mul(self.attempts())
            .saturating_mul(servers)
            .saturating_add(self.retry_interval().saturating_mul(self.retry))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("resolver.timeout_secs must be greater than zero".to_string());
        }
        if let Some(ns) = &self.nameserver {
            if ns.trim().is_empty() {
                return Err("resolver.nameserver cannot be blank".to_string());
            }
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_retry() -> u32 {
    2
}

fn default_retry_interval_secs() -> u64 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolver_options() {
        let cfg = ResolverConfig::default();
        assert_eq!(cfg.timeout_secs, 8);
        assert_eq!(cfg.retry, 2);
        assert_eq!(cfg.retry_interval_secs, 2);
        assert_eq!(cfg.transport, Transport::Udp);
        assert!(cfg.nameserver.is_none());
    }

    #[test]
    fn test_worst_case_duration() {
        let cfg = ResolverConfig::default()
            .with_transport(Transport::Tcp)
            .with_timeout(3)
            .with_retry(2, 1);
        // 3 attempts * 3s + 2 pauses * 1s
        assert_eq!(cfg.worst_case_duration(), Duration::from_secs(11));
        assert_eq!(cfg.attempts(), 3);
    }

    #[test]
    fn test_worst_case_grows_with_servers_and_udp_fallback() {
        let cfg = ResolverConfig::default().with_timeout(1).with_retry(1, 0);
        // 2 attempts * 2 servers * (1s UDP + 1s TCP fallback)
        assert_eq!(cfg.worst_case_duration_for(2), Duration::from_secs(8));
        assert_eq!(cfg.worst_case_duration_for(0), cfg.worst_case_duration());

        let tcp = cfg.with_transport(Transport::Tcp);
        assert_eq!(tcp.worst_case_duration_for(3), Duration::from_secs(6));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let cfg = ResolverConfig::default().with_timeout(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_nameserver() {
        let cfg = ResolverConfig::default().with_nameserver("  ");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_transport_from_str() {
        assert_eq!("TCP".parse::<Transport>(), Ok(Transport::Tcp));
        assert_eq!("udp".parse::<Transport>(), Ok(Transport::Udp));
        assert!("quic".parse::<Transport>().is_err());
    }
}
