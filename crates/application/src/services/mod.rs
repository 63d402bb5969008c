pub mod record_extractor;
pub mod record_lookup;
pub mod task_pool;

pub use record_extractor::RecordExtractor;
pub use record_lookup::RecordLookup;
pub use task_pool::{PoolMetrics, TaskPool, WorkItem};
