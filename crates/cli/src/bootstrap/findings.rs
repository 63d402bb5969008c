use anyhow::Context;
use ferrous_recon_application::ports::{FindingsStore, NullFindingsStore};
use ferrous_recon_domain::config::FindingsConfig;
use ferrous_recon_infrastructure::findings::SqliteFindingsStore;
use std::sync::Arc;
use tracing::info;

pub async fn init_findings_store(cfg: &FindingsConfig) -> anyhow::Result<Arc<dyn FindingsStore>> {
    if !cfg.enabled {
        info!("Findings persistence disabled");
        return Ok(Arc::new(NullFindingsStore));
    }

    let url = cfg.database_url();
    info!("Initializing findings database: {}", url);

    let store = SqliteFindingsStore::connect(&url)
        .await
        .with_context(|| format!("failed to open findings database {}", cfg.database_path))?;

    Ok(Arc::new(store))
}
