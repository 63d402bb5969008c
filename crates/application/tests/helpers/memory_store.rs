use async_trait::async_trait;
use ferrous_recon_application::ports::FindingsStore;
use ferrous_recon_domain::{DomainError, Finding};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryFindingsStore {
    findings: RwLock<Vec<Finding>>,
    should_fail: RwLock<bool>,
}

impl MemoryFindingsStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn findings(&self) -> Vec<Finding> {
        self.findings.read().await.clone()
    }

    pub async fn kinds(&self) -> Vec<String> {
        self.findings
            .read()
            .await
            .iter()
            .map(|f| f.kind.clone())
            .collect()
    }
}

#[async_trait]
impl FindingsStore for MemoryFindingsStore {
    async fn record(&self, finding: Finding) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError("store unavailable".to_string()));
        }
        self.findings.write().await.push(finding);
        Ok(())
    }
}
