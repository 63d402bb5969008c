pub mod config;
pub mod findings;
pub mod logging;

pub use config::load_config;
pub use findings::init_findings_store;
pub use logging::init_logging;
