use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::ConfigError;
use super::findings::FindingsConfig;
use super::logging::LoggingConfig;
use super::resolver::{ResolverConfig, Transport};
use super::scan::ScanConfig;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "ferrous-recon.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub findings: FindingsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub nameserver: Option<String>,
    pub transport: Option<Transport>,
    pub timeout_secs: Option<u64>,
    pub retry: Option<u32>,
    pub retry_interval_secs: Option<u64>,
    pub threads: Option<isize>,
    pub wordlist: Option<PathBuf>,
    pub tld_wordlist: Option<PathBuf>,
    pub range: Option<String>,
    pub findings_enabled: Option<bool>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from an optional file, then apply CLI overrides.
    ///
    /// With no explicit path, `ferrous-recon.toml` in the working directory is
    /// used when present; otherwise defaults apply.
    pub fn load(
        config_path: Option<&str>,
        cli_overrides: CliOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(Path::new(path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(ns) = overrides.nameserver {
            self.resolver.nameserver = Some(ns);
        }
        if let Some(transport) = overrides.transport {
            self.resolver.transport = transport;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.resolver.timeout_secs = timeout;
        }
        if let Some(retry) = overrides.retry {
            self.resolver.retry = retry;
        }
        if let Some(interval) = overrides.retry_interval_secs {
            self.resolver.retry_interval_secs = interval;
        }
        if let Some(threads) = overrides.threads {
            self.scan.threads = threads;
        }
        if overrides.wordlist.is_some() {
            self.scan.wordlist = overrides.wordlist;
        }
        if overrides.tld_wordlist.is_some() {
            self.scan.tld_wordlist = overrides.tld_wordlist;
        }
        if overrides.range.is_some() {
            self.scan.range = overrides.range;
        }
        if let Some(enabled) = overrides.findings_enabled {
            self.findings.enabled = enabled;
        }
        if let Some(path) = overrides.database_path {
            self.findings.database_path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolver.validate().map_err(ConfigError::Validation)?;

        if self.findings.enabled && self.findings.database_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "findings.database_path cannot be empty when findings are enabled".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "Invalid log level '{}' (expected one of: {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}
