use super::RecordType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Service location fields projected out of an SRV answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SrvData {
    /// Target host with the trailing dot stripped
    pub host: String,
    pub port: u16,
    pub priority: u16,
    pub weight: u16,
}

impl fmt::Display for SrvData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{host: {}, port: {}, priority: {}}}",
            self.host, self.port, self.priority
        )
    }
}

/// A typed value pulled out of a DNS answer for a given query name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub source_name: String,
    pub record_type: RecordType,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<SrvData>,
}

impl ExtractedRecord {
    pub fn new(
        source_name: impl Into<String>,
        record_type: RecordType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            record_type,
            value: value.into(),
            extra: None,
        }
    }

    pub fn srv(source_name: impl Into<String>, data: SrvData) -> Self {
        Self {
            source_name: source_name.into(),
            record_type: RecordType::SRV,
            value: format!("{}:{}", data.host, data.port),
            extra: Some(data),
        }
    }

    /// Deduplication key: records are equal for aggregation purposes when
    /// their type and value match, regardless of which name produced them.
    /// SRV targets also differ by priority.
    pub fn key(&self) -> (RecordType, &str, Option<u16>) {
        let priority = self.extra.as_ref().map(|srv| srv.priority);
        (self.record_type, self.value.as_str(), priority)
    }
}

impl fmt::Display for ExtractedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extra {
            Some(srv) => write!(f, "{} {}: {}", self.source_name, self.record_type, srv),
            None => write!(f, "{} {}: {}", self.source_name, self.record_type, self.value),
        }
    }
}
