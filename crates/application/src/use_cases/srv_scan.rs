use ferrous_recon_domain::wordlists::srv_prefixes;
use ferrous_recon_domain::{Finding, FindingData, RecordType, SrvData};
use std::collections::BTreeMap;
use tracing::{info, instrument};

use crate::services::RecordLookup;

/// Query name (`_svc._proto.domain`) to the services it advertises.
pub type SrvScanReport = BTreeMap<String, Vec<SrvData>>;

/// Walks the well-known `_service._proto` table one query at a time.
pub struct SrvScanUseCase {
    lookup: RecordLookup,
}

impl SrvScanUseCase {
    pub fn new(lookup: RecordLookup) -> Self {
        Self { lookup }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Option<SrvScanReport> {
        self.lookup
            .sink()
            .status(&format!("Querying DNS SRV records for {}", domain));

        let mut report = SrvScanReport::new();

        for prefix in srv_prefixes() {
            let name = format!("{}.{}", prefix, domain);

            let mut services: Vec<SrvData> = Vec::new();
            for record in self.lookup.lookup(&name, RecordType::SRV).await {
                if let Some(srv) = record.extra {
                    if !services.contains(&srv) {
                        services.push(srv);
                    }
                }
            }

            if services.is_empty() {
                continue;
            }

            for srv in &services {
                self.lookup.sink().good(&format!("{} SRV: {}", name, srv));
            }

            self.lookup
                .record(Finding::new(
                    name.as_str(),
                    name.as_str(),
                    FindingData::Services(services.clone()),
                ))
                .await;
            report.insert(name, services);
        }

        info!(domain = %domain, names = report.len(), "SRV scan finished");
        (!report.is_empty()).then_some(report)
    }
}
