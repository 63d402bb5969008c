#![allow(dead_code)]

pub mod memory_store;
pub mod recording_sink;
pub mod stub_querier;

pub use memory_store::MemoryFindingsStore;
pub use recording_sink::RecordingSink;
pub use stub_querier::{a_answer, ns_answer, srv_answer, StubQuerier};

use ferrous_recon_application::services::RecordLookup;
use ferrous_recon_domain::ResolverConfig;
use std::sync::Arc;

/// Wires a lookup service over the given doubles with a fast resolver config.
pub fn lookup_with(
    querier: Arc<StubQuerier>,
    sink: Arc<RecordingSink>,
    store: Arc<MemoryFindingsStore>,
) -> RecordLookup {
    let config = ResolverConfig::default().with_timeout(1).with_retry(0, 0);
    RecordLookup::new(querier, Arc::new(config), store, sink)
}
