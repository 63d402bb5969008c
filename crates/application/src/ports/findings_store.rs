use async_trait::async_trait;
use ferrous_recon_domain::{DomainError, Finding};

#[async_trait]
pub trait FindingsStore: Send + Sync {
    async fn record(&self, finding: Finding) -> Result<(), DomainError>;
}

/// Store used when persistence is turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFindingsStore;

#[async_trait]
impl FindingsStore for NullFindingsStore {
    async fn record(&self, _finding: Finding) -> Result<(), DomainError> {
        Ok(())
    }
}
