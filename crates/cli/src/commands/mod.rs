use anyhow::{bail, Context};
use ferrous_recon_application::ports::StatusSink;
use ferrous_recon_domain::{Config, EnumerationResult};
use ferrous_recon_infrastructure::input::{CidrRange, WordlistReader};
use std::net::IpAddr;
use std::path::Path;
use tracing::{info, instrument};

use crate::di::UseCases;
use crate::Commands;

pub async fn run(
    command: Commands,
    config: &Config,
    use_cases: &UseCases,
    sink: &dyn StatusSink,
) -> anyhow::Result<()> {
    match command {
        Commands::Lookup { name, record_type } => {
            match record_type {
                Some(record_type) => {
                    use_cases.lookup_records.execute(&name, record_type).await;
                }
                None => {
                    use_cases.lookup_records.execute_standard(&name).await;
                }
            }
            Ok(())
        }
        Commands::Axfr { domain } => {
            zone_transfer(&domain, use_cases, sink).await;
            Ok(())
        }
        Commands::Brute { domain, .. } => {
            let Some(path) = config.scan.wordlist.as_deref() else {
                bail!("brute force needs a wordlist (--wordlist or scan.wordlist)");
            };
            brute_force(&domain, path, config, use_cases, sink).await
        }
        Commands::Reverse { .. } => reverse_sweep(config, use_cases, sink).await,
        Commands::Tld { domain, .. } => tld_scan(&domain, config, use_cases, sink).await,
        Commands::Srv { domain } => {
            srv_scan(&domain, use_cases, sink).await;
            Ok(())
        }
        Commands::Wildcard { domain } => {
            use_cases.wildcard.execute(&domain).await;
            Ok(())
        }
        Commands::All { domain, .. } => enumerate_all(&domain, config, use_cases, sink).await,
    }
}

/// Wildcard check, standard records, SRV, AXFR and TLD expansion, then brute
/// force and the reverse sweep when their inputs are configured.
#[instrument(skip(config, use_cases, sink))]
async fn enumerate_all(
    domain: &str,
    config: &Config,
    use_cases: &UseCases,
    sink: &dyn StatusSink,
) -> anyhow::Result<()> {
    use_cases.wildcard.execute(domain).await;
    use_cases.lookup_records.execute_standard(domain).await;
    srv_scan(domain, use_cases, sink).await;
    zone_transfer(domain, use_cases, sink).await;
    tld_scan(domain, config, use_cases, sink).await?;

    if let Some(path) = config.scan.wordlist.as_deref() {
        brute_force(domain, path, config, use_cases, sink).await?;
    }
    if config.scan.range.is_some() {
        reverse_sweep(config, use_cases, sink).await?;
    }

    Ok(())
}

async fn zone_transfer(domain: &str, use_cases: &UseCases, sink: &dyn StatusSink) {
    match use_cases.zone_transfer.execute(domain).await {
        Some(report) => sink.good(&format!(
            "{} zone(s) transferred for {}, {} records",
            report.zones.len(),
            domain,
            report.record_count()
        )),
        None => sink.status(&format!("No zone transfer possible for {}", domain)),
    }
}

async fn srv_scan(domain: &str, use_cases: &UseCases, sink: &dyn StatusSink) {
    if let Some(report) = use_cases.srv_scan.execute(domain).await {
        let targets: usize = report.values().map(Vec::len).sum();
        sink.good(&format!(
            "{} SRV service(s) found for {}, {} targets",
            report.len(),
            domain,
            targets
        ));
    }
}

async fn brute_force(
    domain: &str,
    wordlist: &Path,
    config: &Config,
    use_cases: &UseCases,
    sink: &dyn StatusSink,
) -> anyhow::Result<()> {
    let words = WordlistReader::read(wordlist).await?;
    let result = use_cases
        .brute_force
        .execute(domain, &words, config.scan.threads)
        .await;
    summarize(sink, "Brute force", domain, result.as_ref());
    Ok(())
}

async fn tld_scan(
    domain: &str,
    config: &Config,
    use_cases: &UseCases,
    sink: &dyn StatusSink,
) -> anyhow::Result<()> {
    let tlds = match config.scan.tld_wordlist.as_deref() {
        Some(path) => Some(WordlistReader::read(path).await?),
        None => None,
    };
    let result = use_cases
        .tld_scan
        .execute(domain, tlds, config.scan.threads)
        .await;
    summarize(sink, "TLD scan", domain, result.as_ref());
    Ok(())
}

async fn reverse_sweep(
    config: &Config,
    use_cases: &UseCases,
    sink: &dyn StatusSink,
) -> anyhow::Result<()> {
    let range = config
        .scan
        .range
        .as_deref()
        .map(str::parse::<CidrRange>)
        .transpose()
        .context("invalid reverse lookup range")?;

    let addresses: Option<Vec<IpAddr>> = range.as_ref().map(|r| r.iter().collect());
    let result = use_cases
        .reverse_sweep
        .execute(addresses, config.scan.threads)
        .await?;

    let label = config.scan.range.as_deref().unwrap_or_default();
    summarize(sink, "Reverse sweep", label, result.as_ref());
    Ok(())
}

fn summarize(sink: &dyn StatusSink, step: &str, target: &str, result: Option<&EnumerationResult>) {
    match result {
        Some(found) => sink.good(&format!("{} of {}: {} records", step, target, found.len())),
        None => info!(step, target, "Nothing found"),
    }
}
