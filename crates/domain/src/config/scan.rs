use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Inputs of the fan-out enumerators
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Concurrent lookups for brute force, reverse sweep and TLD scan.
    /// Values below 1 are treated as 1.
    #[serde(default = "default_threads")]
    pub threads: isize,

    /// Subdomain labels, one per line
    #[serde(default)]
    pub wordlist: Option<PathBuf>,

    /// Top-level domains, one per line (built-in table when unset)
    #[serde(default)]
    pub tld_wordlist: Option<PathBuf>,

    /// CIDR block (or single address) for the reverse sweep
    #[serde(default)]
    pub range: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            wordlist: None,
            tld_wordlist: None,
            range: None,
        }
    }
}

fn default_threads() -> isize {
    1
}
