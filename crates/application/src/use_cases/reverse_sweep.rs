use ferrous_recon_domain::{DomainError, EnumerationResult, RecordType};
use futures::FutureExt;
use std::net::IpAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::services::{PoolMetrics, RecordLookup, TaskPool, WorkItem};

/// PTR lookups over every address of a range, through the task pool.
pub struct ReverseSweepUseCase {
    lookup: RecordLookup,
    metrics: Arc<PoolMetrics>,
    cancel: CancellationToken,
}

impl ReverseSweepUseCase {
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

    /// A missing range is an input error; an empty one yields `Ok(None)`.
    #[instrument(skip(self, range))]
    pub async fn execute<I>(
        &self,
        range: Option<I>,
        concurrency: isize,
    ) -> Result<Option<EnumerationResult>, DomainError>
    where
        I: IntoIterator<Item = IpAddr>,
    {
        let Some(range) = range else {
            self.lookup
                .sink()
                .error("Reverse lookup enabled but no IP range specified");
            return Err(DomainError::InputError(
                "reverse sweep requires an IP range".to_string(),
            ));
        };

        let addresses: Vec<IpAddr> = range.into_iter().collect();
        if addresses.is_empty() {
            return Ok(None);
        }

        self.lookup.sink().status(&format!(
            "Running reverse lookup against {} addresses",
            addresses.len()
        ));

        let items: Vec<WorkItem<_>> = addresses
            .into_iter()
            .map(|ip| {
                let lookup = self.lookup.clone();
                async move {
                    lookup
                        .lookup_and_record(
                            &ip.to_string(),
                            RecordType::PTR,
                            RecordType::PTR.finding_kind(),
                            true,
                        )
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
        info!(found = result.len(), "Reverse sweep finished");
        Ok(result.into_option())
    }
}
