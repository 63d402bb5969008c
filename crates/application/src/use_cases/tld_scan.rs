use ferrous_recon_domain::wordlists::DEFAULT_TLDS;
use ferrous_recon_domain::{EnumerationResult, RecordType};
use futures::FutureExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::services::{PoolMetrics, RecordLookup, TaskPool, WorkItem};

const TLD_KIND: &str = "DNS TLD records";

/// Swaps the domain's last label for every candidate TLD and resolves the
/// result through the task pool.
pub struct TldScanUseCase {
    lookup: RecordLookup,
    metrics: Arc<PoolMetrics>,
    cancel: CancellationToken,
}

impl TldScanUseCase {
    pub fn new(lookup: RecordLookup) -> Self {
        Self {
            lookup,
            metrics: Arc::new(PoolMetrics::default()),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<PoolMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// `tlds` replaces the built-in table when given.
    #[instrument(skip(self, tlds))]
    pub async fn execute(
        &self,
        domain: &str,
        tlds: Option<Vec<String>>,
        concurrency: isize,
    ) -> Option<EnumerationResult> {
        self.lookup
            .sink()
            .status(&format!("Querying DNS TLD records for {}", domain));

        let Some(base) = strip_tld(domain) else {
            self.lookup.sink().error(&format!(
                "Cannot derive a base name from {}: expected at least two labels",
                domain
            ));
            return None;
        };

        let candidates: Vec<String> = match tlds {
            Some(list) => list
                .iter()
                .map(|tld| tld.trim().trim_start_matches('.').to_lowercase())
                .filter(|tld| !tld.is_empty())
                .collect(),
            None => DEFAULT_TLDS.iter().map(|tld| tld.to_string()).collect(),
        };

        if candidates.is_empty() {
            return None;
        }

        let items: Vec<WorkItem<_>> = candidates
            .into_iter()
            .map(|tld| {
                let lookup = self.lookup.clone();
                let name = format!("{}.{}", base, tld);
                async move {
                    let Some(found) = lookup
                        .lookup_and_record(&name, RecordType::A, TLD_KIND, false)
                        .await
                    else {
                        return Vec::new();
                    };
                    lookup
                        .sink()
                        .good(&format!("{}: TLD: {}", name, found.values().join(", ")));
                    found.into_records()
                }
                .boxed()
            })
            .collect();

        let pool = TaskPool::new(concurrency)
            .with_item_timeout(self.lookup.item_deadline().await)
            .with_cancellation(self.cancel.clone())
            .with_metrics(Arc::clone(&self.metrics));

        let result: EnumerationResult = pool.run(items).await.into_iter().collect();
        info!(domain = %domain, found = result.len(), "TLD scan finished");
        result.into_option()
    }
}

/// `www.example.com` -> `www.example`. `None` when there is nothing left.
fn strip_tld(domain: &str) -> Option<&str> {
    let domain = domain.trim().trim_end_matches('.');
    let (base, _tld) = domain.rsplit_once('.')?;
    (!base.is_empty()).then_some(base)
}
