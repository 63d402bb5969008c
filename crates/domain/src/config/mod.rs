//! Configuration module for Ferrous Recon
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `resolver`: Query transport, timeout and retry policy
//! - `scan`: Fan-out enumeration inputs (threads, wordlists, IP range)
//! - `findings`: Persistence of discovered records
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod findings;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod scan;

pub use errors::ConfigError;
pub use findings::FindingsConfig;
pub use logging::LoggingConfig;
pub use resolver::{ResolverConfig, Transport};
pub use root::{CliOverrides, Config};
pub use scan::ScanConfig;
