use ferrous_recon_domain::{EnumerationResult, RecordType};
use futures::FutureExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::services::{PoolMetrics, RecordLookup, TaskPool, WorkItem};

const BRUTEFORCE_KIND: &str = "DNS bruteforce records";

/// Resolves `label.domain` for every wordlist entry through the task pool.
pub struct BruteForceUseCase {
    lookup: RecordLookup,
    metrics: Arc<PoolMetrics>,
    cancel: CancellationToken,
}

impl BruteForceUseCase {
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

    #[instrument(skip(self, wordlist))]
    pub async fn execute<I, S>(
        &self,
        domain: &str,
        wordlist: I,
        concurrency: isize,
    ) -> Option<EnumerationResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates: Vec<String> = wordlist
            .into_iter()
            .filter_map(|line| {
                let label = line.as_ref().trim();
                (!label.is_empty()).then(|| format!("{}.{}", label, domain))
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }

        self.lookup.sink().status(&format!(
            "Bruteforcing {} with {} candidates",
            domain,
            candidates.len()
        ));

        let items: Vec<WorkItem<_>> = candidates
            .into_iter()
            .map(|name| {
                let lookup = self.lookup.clone();
                async move {
                    lookup
                        .lookup_and_record(&name, RecordType::A, BRUTEFORCE_KIND, true)
                        .await
                        .map(|found| found.into_records())
                        .unwrap_or_default()
                }
                .boxed()
            })
            .collect();

        let pool = TaskPool::new(concurrency)
            .with_item_timeout(self.lookup.item_deadline().await)
            .with_cancellation(self.cancel.clone())
            .with_metrics(Arc::clone(&self.metrics));

        let result: EnumerationResult = pool.run(items).await.into_iter().collect();
        info!(domain = %domain, found = result.len(), "Bruteforce finished");
        result.into_option()
    }
}
