use super::AnswerRecord;
use serde::{Deserialize, Serialize};

/// Records returned by one successful zone transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTransfer {
    /// Nameserver the transfer was requested from
    pub nameserver: String,
    pub records: Vec<AnswerRecord>,
}

impl ZoneTransfer {
    pub fn new(nameserver: impl Into<String>, records: Vec<AnswerRecord>) -> Self {
        Self {
            nameserver: nameserver.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
