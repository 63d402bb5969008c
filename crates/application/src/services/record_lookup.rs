use ferrous_recon_domain::{
    EnumerationResult, ExtractedRecord, FailureKind, Finding, QueryOutcome, QueryTarget,
    RecordType, ResolverConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::RecordExtractor;
use crate::ports::{DnsQuerier, FindingsStore, StatusSink};

/// Slack on top of the querier's worst case before a query is given up.
const QUERY_DEADLINE_SLACK: Duration = Duration::from_secs(1);

/// Extra time a pooled item gets past its query deadline to report and
/// persist.
const ITEM_DEADLINE_SLACK: Duration = Duration::from_secs(1);

/// Query, extract, report and persist: the step every enumerator repeats.
///
/// Cheap to clone; each pooled work item owns its own copy.
#[derive(Clone)]
pub struct RecordLookup {
    querier: Arc<dyn DnsQuerier>,
    config: Arc<ResolverConfig>,
    findings: Arc<dyn FindingsStore>,
    sink: Arc<dyn StatusSink>,
    persist: bool,
    query_deadline: Arc<OnceCell<Duration>>,
}

impl RecordLookup {
    pub fn new(
        querier: Arc<dyn DnsQuerier>,
        config: Arc<ResolverConfig>,
        findings: Arc<dyn FindingsStore>,
        sink: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            querier,
            config,
            findings,
            sink,
            persist: true,
            query_deadline: Arc::new(OnceCell::new()),
        }
    }

    /// Toggle persistence of findings (`findings.enabled`).
    pub fn with_persistence(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn querier(&self) -> &Arc<dyn DnsQuerier> {
        &self.querier
    }

    pub fn sink(&self) -> &dyn StatusSink {
        self.sink.as_ref()
    }

    /// How long one query may run before it is reported as timed out.
    /// Computed once from the querier and shared by every clone.
    pub async fn query_deadline(&self) -> Duration {
        *self
            .query_deadline
            .get_or_init(|| async {
                self.querier.worst_case(&self.config).await + QUERY_DEADLINE_SLACK
            })
            .await
    }

    /// Deadline for one pooled lookup. Always later than
    /// [`query_deadline`](Self::query_deadline), so a slow query is
    /// reported by the lookup before the pool drops the item.
    pub async fn item_deadline(&self) -> Duration {
        self.query_deadline().await + ITEM_DEADLINE_SLACK
    }

    /// Issues one query and returns the extracted values. A failed query is
    /// reported to the status sink once and yields nothing.
    pub async fn lookup(&self, name: &str, record_type: RecordType) -> Vec<ExtractedRecord> {
        let target = QueryTarget::new(name, record_type);
        let deadline = self.query_deadline().await;
        let outcome = tokio::time::timeout(deadline, self.querier.query(&target, &self.config))
            .await
            .unwrap_or_else(|_| {
                QueryOutcome::failure(
                    FailureKind::Timeout,
                    format!("no answer within {:?}", deadline),
                )
            });

        if let QueryOutcome::Failure { kind, message } = &outcome {
            debug!(name = %name, record_type = %record_type, kind = %kind, "Query failed");
            self.sink.error(&format!(
                "Query {} DNS {} failed ({}): {}",
                name, record_type, kind, message
            ));
        }

        RecordExtractor::extract(&outcome, &target)
    }

    /// [`lookup`](Self::lookup), then announce each value when `announce`
    /// is set and persist the set under `kind`. Returns `None` when nothing
    /// was found.
    pub async fn lookup_and_record(
        &self,
        name: &str,
        record_type: RecordType,
        kind: &str,
        announce: bool,
    ) -> Option<EnumerationResult> {
        let result: EnumerationResult = self.lookup(name, record_type).await.into_iter().collect();
        let result = result.into_option()?;

        if announce {
            for record in result.iter() {
                self.sink.good(&format!("{} {}: {}", name, record_type, record.value));
            }
        }

        self.record(Finding::records(name, kind, result.records().to_vec()))
            .await;
        Some(result)
    }

    /// Hands a finding to the store when persistence is on. Store failures
    /// are logged and swallowed.
    pub async fn record(&self, finding: Finding) {
        if !self.persist || finding.data.is_empty() {
            return;
        }

        let target = finding.target.clone();
        let kind = finding.kind.clone();
        if let Err(e) = self.findings.record(finding).await {
            warn!(finding_target = %target, kind = %kind, error = %e, "Failed to persist finding");
        }
    }
}
