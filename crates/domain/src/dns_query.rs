use super::RecordType;
use std::fmt;
use std::sync::Arc;

/// One question to put to a resolver: a name (domain or IP literal) and a type.
/// Uses `Arc<str>` so retries and fan-out workers can share the name cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryTarget {
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl QueryTarget {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.record_type)
    }
}
