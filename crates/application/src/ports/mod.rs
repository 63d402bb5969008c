pub mod dns_querier;
pub mod findings_store;
pub mod status_sink;

pub use dns_querier::DnsQuerier;
pub use findings_store::{FindingsStore, NullFindingsStore};
pub use status_sink::{NullStatusSink, StatusSink};
