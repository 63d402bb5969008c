use crate::dns_record::{ExtractedRecord, SrvData, ZoneTransfer};
use serde::Serialize;

/// Payload of a persisted finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FindingData {
    Records(Vec<ExtractedRecord>),
    Zones(Vec<ZoneTransfer>),
    Services(Vec<SrvData>),
}

impl FindingData {
    pub fn len(&self) -> usize {
        match self {
            FindingData::Records(r) => r.len(),
            FindingData::Zones(z) => z.len(),
            FindingData::Services(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What gets handed to the findings store: the target that was queried,
/// a kind label (e.g. `"DNS MX records"`) and the values discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub target: String,
    pub kind: String,
    pub data: FindingData,
}

impl Finding {
    pub fn new(target: impl Into<String>, kind: impl Into<String>, data: FindingData) -> Self {
        Self {
            target: target.into(),
            kind: kind.into(),
            data,
        }
    }

    pub fn records(
        target: impl Into<String>,
        kind: impl Into<String>,
        records: Vec<ExtractedRecord>,
    ) -> Self {
        Self::new(target, kind, FindingData::Records(records))
    }
}
