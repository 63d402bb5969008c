use ferrous_recon_domain::{
    FailureKind, Finding, FindingData, QueryOutcome, RecordType, ZoneTransfer,
};
use std::net::IpAddr;
use tracing::{debug, info, instrument};

use crate::services::RecordLookup;

const AXFR_KIND: &str = "DNS AXFR records";

/// A nameserver that could not hand over the zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameserverFailure {
    pub nameserver: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Every zone obtained for a domain plus the nameservers that refused or
/// failed along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTransferReport {
    pub domain: String,
    pub zones: Vec<ZoneTransfer>,
    pub failures: Vec<NameserverFailure>,
}

impl ZoneTransferReport {
    pub fn record_count(&self) -> usize {
        self.zones.iter().map(ZoneTransfer::len).sum()
    }
}

/// Attempts AXFR against each authoritative nameserver of a domain, one at a
/// time. One nameserver failing never stops the others from being tried.
pub struct ZoneTransferUseCase {
    lookup: RecordLookup,
}

impl ZoneTransferUseCase {
    pub fn new(lookup: RecordLookup) -> Self {
        Self { lookup }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Option<ZoneTransferReport> {
        let nameservers = self
            .lookup
            .lookup_and_record(domain, RecordType::NS, RecordType::NS.finding_kind(), true)
            .await?;

        let mut zones = Vec::new();
        let mut failures = Vec::new();

        for nameserver in nameservers.values() {
            let nameserver = nameserver.trim();
            if nameserver.is_empty() {
                continue;
            }

            self.lookup.sink().status(&format!(
                "Attempting DNS AXFR for {} from {}",
                domain, nameserver
            ));

            let servers = self.candidate_addresses(nameserver).await;
            if servers.is_empty() {
                self.fail(
                    &mut failures,
                    domain,
                    nameserver,
                    FailureKind::ConfigError,
                    "no address found for nameserver".to_string(),
                );
                continue;
            }

            let outcome = self
                .lookup
                .querier()
                .transfer_zone(domain, &servers, self.lookup.config())
                .await;

            match outcome {
                QueryOutcome::Success(answer) => {
                    self.lookup.sink().good(&format!(
                        "{} Zone Transfer: {} records from {}",
                        domain,
                        answer.answers.len(),
                        nameserver
                    ));
                    zones.push(ZoneTransfer::new(nameserver, answer.answers));
                }
                QueryOutcome::Empty => {
                    debug!(domain = %domain, nameserver = %nameserver, "AXFR returned no records");
                }
                QueryOutcome::Failure { kind, message } => {
                    self.fail(&mut failures, domain, nameserver, kind, message);
                }
            }
        }

        if zones.is_empty() {
            info!(domain = %domain, failures = failures.len(), "No zone transferred");
            return None;
        }

        self.lookup
            .record(Finding::new(domain, AXFR_KIND, FindingData::Zones(zones.clone())))
            .await;

        Some(ZoneTransferReport {
            domain: domain.to_string(),
            zones,
            failures,
        })
    }

    /// The nameserver itself when it is an IP literal, its A addresses
    /// otherwise. Lookup failures leave the list empty, never abort.
    async fn candidate_addresses(&self, nameserver: &str) -> Vec<IpAddr> {
        if let Ok(ip) = nameserver.trim_end_matches('.').parse::<IpAddr>() {
            return vec![ip];
        }

        let mut servers: Vec<IpAddr> = Vec::new();
        if let Some(addresses) = self
            .lookup
            .lookup_and_record(nameserver, RecordType::A, AXFR_KIND, false)
            .await
        {
            for record in addresses.iter() {
                if let Ok(ip) = record.value.parse::<IpAddr>() {
                    if !servers.contains(&ip) {
                        servers.push(ip);
                    }
                }
            }
        }

        servers
    }

    fn fail(
        &self,
        failures: &mut Vec<NameserverFailure>,
        domain: &str,
        nameserver: &str,
        kind: FailureKind,
        message: String,
    ) {
        self.lookup.sink().error(&format!(
            "Zone transfer of {} from {} failed ({}): {}",
            domain, nameserver, kind, message
        ));
        failures.push(NameserverFailure {
            nameserver: nameserver.to_string(),
            kind,
            message,
        });
    }
}
