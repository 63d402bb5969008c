use ferrous_recon_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        nameserver = config.resolver.nameserver.as_deref().unwrap_or("system"),
        transport = %config.resolver.transport,
        timeout_secs = config.resolver.timeout_secs,
        retry = config.resolver.retry,
        threads = config.scan.threads,
        findings = config.findings.enabled,
        "Configuration loaded"
    );

    Ok(config)
}
