//! # Ferrous Recon
//!
//! DNS reconnaissance: record lookups, zone transfers, SRV discovery,
//! wildcard detection, subdomain brute force, reverse sweeps and TLD
//! expansion.

mod bootstrap;
mod commands;
mod di;

use clap::{Parser, Subcommand};
use ferrous_recon_domain::{CliOverrides, RecordType, Transport};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "ferrous-recon")]
#[command(author, version, about = "DNS enumeration toolkit", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path (default: ./ferrous-recon.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// Nameserver to query instead of the system resolvers (ip, ip:port or host)
    #[arg(short = 'n', long, global = true, value_name = "SERVER")]
    nameserver: Option<String>,

    /// Use TCP for ordinary queries
    #[arg(long, global = true)]
    tcp: bool,

    /// Per-attempt timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Extra attempts when no response arrives
    #[arg(long, global = true)]
    retry: Option<u32>,

    /// Pause between attempts in seconds
    #[arg(long, global = true, value_name = "SECS")]
    retry_interval: Option<u64>,

    /// Concurrent lookups for brute force, reverse sweep and TLD scan
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    threads: Option<isize>,

    /// Do not persist findings
    #[arg(long, global = true)]
    no_note: bool,

    /// Findings database file
    #[arg(long, global = true, value_name = "FILE")]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up one record type, or the standard set (A, CNAME, NS, MX, SOA, TXT)
    Lookup {
        name: String,
        /// Record type (A, CNAME, NS, MX, SOA, TXT, PTR)
        #[arg(short = 'r', long = "type")]
        record_type: Option<RecordType>,
    },

    /// Attempt a zone transfer from every authoritative nameserver
    Axfr { domain: String },

    /// Brute force subdomains from a wordlist
    Brute {
        domain: String,
        #[arg(short, long, value_name = "FILE")]
        wordlist: Option<PathBuf>,
    },

    /// Reverse (PTR) lookups over a CIDR block, address or IPv4 range
    Reverse { range: Option<String> },

    /// Try the domain's base name under other top-level domains
    Tld {
        domain: String,
        #[arg(long, value_name = "FILE")]
        tld_wordlist: Option<PathBuf>,
    },

    /// Query well-known SRV service names
    Srv { domain: String },

    /// Check whether the domain answers for random subdomains
    Wildcard { domain: String },

    /// Run every enumeration in sequence
    All {
        domain: String,
        #[arg(short, long, value_name = "FILE")]
        wordlist: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        tld_wordlist: Option<PathBuf>,
        #[arg(long)]
        range: Option<String>,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            nameserver: self.nameserver.clone(),
            transport: self.tcp.then_some(Transport::Tcp),
            timeout_secs: self.timeout,
            retry: self.retry,
            retry_interval_secs: self.retry_interval,
            threads: self.threads,
            findings_enabled: self.no_note.then_some(false),
            database_path: self.database.clone(),
            log_level: self.log_level.clone(),
            ..Default::default()
        };

        match &self.command {
            Commands::Brute { wordlist, .. } => overrides.wordlist = wordlist.clone(),
            Commands::Reverse { range } => overrides.range = range.clone(),
            Commands::Tld { tld_wordlist, .. } => overrides.tld_wordlist = tld_wordlist.clone(),
            Commands::All {
                wordlist,
                tld_wordlist,
                range,
                ..
            } => {
                overrides.wordlist = wordlist.clone();
                overrides.tld_wordlist = tld_wordlist.clone();
                overrides.range = range.clone();
            }
            _ => {}
        }

        overrides
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);

    let findings = bootstrap::init_findings_store(&config.findings).await?;
    let dns = di::DnsServices::new(&config, findings);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing in-flight lookups");
            on_signal.cancel();
        }
    });

    let use_cases = di::UseCases::new(&dns.lookup, cancel);
    commands::run(cli.command, &config, &use_cases, dns.sink.as_ref()).await?;

    let metrics = &use_cases.metrics;
    info!(
        workers = metrics.workers_started(),
        completed = metrics.items_completed(),
        dropped = metrics.items_dropped(),
        "Enumeration finished"
    );

    Ok(())
}
