use ferrous_recon_application::ports::{DnsQuerier, FindingsStore, StatusSink};
use ferrous_recon_application::services::RecordLookup;
use ferrous_recon_domain::Config;
use ferrous_recon_infrastructure::dns::WireQueryClient;
use ferrous_recon_infrastructure::status::TracingStatusSink;
use std::sync::Arc;
use tracing::info;

/// Query side of the application: the wire client plus the shared lookup
/// step every enumerator builds on.
pub struct DnsServices {
    pub sink: Arc<dyn StatusSink>,
    pub lookup: RecordLookup,
}

impl DnsServices {
    pub fn new(config: &Config, findings: Arc<dyn FindingsStore>) -> Self {
        let querier: Arc<dyn DnsQuerier> = Arc::new(WireQueryClient::new());
        let sink: Arc<dyn StatusSink> = Arc::new(TracingStatusSink);

        let lookup = RecordLookup::new(
            querier,
            Arc::new(config.resolver.clone()),
            findings,
            Arc::clone(&sink),
        )
        .with_persistence(config.findings.enabled);

        info!(
            transport = %config.resolver.transport,
            timeout_secs = config.resolver.timeout().as_secs(),
            "DNS services initialized"
        );

        Self {
            sink,
            lookup,
        }
    }
}
