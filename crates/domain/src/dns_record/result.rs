use super::{ExtractedRecord, RecordType};
use serde::Serialize;
use std::collections::HashSet;

/// Insertion-ordered record list, unique by [`ExtractedRecord::key`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EnumerationResult {
    records: Vec<ExtractedRecord>,
    #[serde(skip)]
    seen: HashSet<(RecordType, String, Option<u16>)>,
}

impl EnumerationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record unless one with the same key is already held.
    /// Returns whether the record was added.
    pub fn push(&mut self, record: ExtractedRecord) -> bool {
        let (record_type, value, priority) = record.key();
        if !self.seen.insert((record_type, value.to_string(), priority)) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn extend<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = ExtractedRecord>,
    {
        for record in records {
            self.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedRecord> {
        self.records.iter()
    }

    pub fn values(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.value.as_str()).collect()
    }

    /// Converts to the absent-aware form used by enumerators: no records
    /// means `None`.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn into_records(self) -> Vec<ExtractedRecord> {
        self.records
    }
}

impl FromIterator<ExtractedRecord> for EnumerationResult {
    fn from_iter<I: IntoIterator<Item = ExtractedRecord>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl IntoIterator for EnumerationResult {
    type Item = ExtractedRecord;
    type IntoIter = std::vec::IntoIter<ExtractedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a EnumerationResult {
    type Item = &'a ExtractedRecord;
    type IntoIter = std::slice::Iter<'a, ExtractedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
