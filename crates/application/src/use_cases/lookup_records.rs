use ferrous_recon_domain::{EnumerationResult, RecordType};
use tracing::instrument;

use crate::services::RecordLookup;

/// Plain lookups of one record type for one name (A, CNAME, NS, MX, SOA,
/// TXT, PTR).
pub struct LookupRecordsUseCase {
    lookup: RecordLookup,
}

impl LookupRecordsUseCase {
    pub fn new(lookup: RecordLookup) -> Self {
        Self { lookup }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, name: &str, record_type: RecordType) -> Option<EnumerationResult> {
        self.lookup
            .sink()
            .status(&format!("Querying DNS {} records for {}", record_type, name));

        self.lookup
            .lookup_and_record(name, record_type, record_type.finding_kind(), true)
            .await
    }

    /// Runs the standard record set of a domain, in order, and returns the
    /// types that produced something.
    #[instrument(skip(self))]
    pub async fn execute_standard(&self, domain: &str) -> Vec<(RecordType, EnumerationResult)> {
        let mut found = Vec::new();
        for record_type in RecordType::lookup_types() {
            if let Some(result) = self.execute(domain, *record_type).await {
                found.push((*record_type, result));
            }
        }
        found
    }
}
