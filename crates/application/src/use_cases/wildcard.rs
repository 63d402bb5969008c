use ferrous_recon_domain::RecordType;
use tracing::instrument;

use crate::services::RecordLookup;

const RANDOM_LABEL_LEN: usize = 16;

/// Queries a random label under the domain; any A answer means the zone (or
/// the resolver in between) answers for names that do not exist.
pub struct DetectWildcardUseCase {
    lookup: RecordLookup,
}

impl DetectWildcardUseCase {
    pub fn new(lookup: RecordLookup) -> Self {
        Self { lookup }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> bool {
        let label: String = (0..RANDOM_LABEL_LEN).map(|_| fastrand::alphabetic()).collect();
        let random_name = format!("{}.{}", label.to_lowercase(), domain);

        let found = self
            .lookup
            .lookup_and_record(&random_name, RecordType::A, "DNS wildcard records", false)
            .await;

        match found {
            Some(addresses) => {
                self.lookup.sink().warning(&format!(
                    "DNS wildcard is enabled OR fake DNS server ({} resolves to {})",
                    random_name,
                    addresses.values().join(", ")
                ));
                true
            }
            None => false,
        }
    }
}
