pub mod brute_force;
pub mod lookup_records;
pub mod reverse_sweep;
pub mod srv_scan;
pub mod tld_scan;
pub mod wildcard;
pub mod zone_transfer;

// Re-export use cases
pub use brute_force::BruteForceUseCase;
pub use lookup_records::LookupRecordsUseCase;
pub use reverse_sweep::ReverseSweepUseCase;
pub use srv_scan::{SrvScanReport, SrvScanUseCase};
pub use tld_scan::TldScanUseCase;
pub use wildcard::DetectWildcardUseCase;
pub use zone_transfer::{NameserverFailure, ZoneTransferReport, ZoneTransferUseCase};
