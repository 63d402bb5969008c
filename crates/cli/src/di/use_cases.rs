use ferrous_recon_application::services::{PoolMetrics, RecordLookup};
use ferrous_recon_application::use_cases::{
    BruteForceUseCase, DetectWildcardUseCase, LookupRecordsUseCase, ReverseSweepUseCase,
    SrvScanUseCase, TldScanUseCase, ZoneTransferUseCase,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct UseCases {
    pub lookup_records: LookupRecordsUseCase,
    pub wildcard: DetectWildcardUseCase,
    pub zone_transfer: ZoneTransferUseCase,
    pub srv_scan: SrvScanUseCase,
    pub brute_force: BruteForceUseCase,
    pub reverse_sweep: ReverseSweepUseCase,
    pub tld_scan: TldScanUseCase,
    pub metrics: Arc<PoolMetrics>,
}

impl UseCases {
    /// Fan-out enumerators share `metrics` and stop handing out work once
    /// `cancel` fires.
    pub fn new(lookup: &RecordLookup, cancel: CancellationToken) -> Self {
        let metrics = Arc::new(PoolMetrics::default());

        Self {
            lookup_records: LookupRecordsUseCase::new(lookup.clone()),
            wildcard: DetectWildcardUseCase::new(lookup.clone()),
            zone_transfer: ZoneTransferUseCase::new(lookup.clone()),
            srv_scan: SrvScanUseCase::new(lookup.clone()),
            brute_force: BruteForceUseCase::new(lookup.clone())
                .with_metrics(Arc::clone(&metrics))
                .with_cancellation(cancel.clone()),
            reverse_sweep: ReverseSweepUseCase::new(lookup.clone())
                .with_metrics(Arc::clone(&metrics))
                .with_cancellation(cancel.clone()),
            tld_scan: TldScanUseCase::new(lookup.clone())
                .with_metrics(Arc::clone(&metrics))
                .with_cancellation(cancel),
            metrics,
        }
    }
}
