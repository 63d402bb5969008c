use super::RecordType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Typed payload of one answer-section record.
///
/// Names are kept in presentation format with their trailing dot, exactly as
/// the wire parser produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum AnswerData {
    A {
        address: Ipv4Addr,
    },
    Aaaa {
        address: Ipv6Addr,
    },
    Ns {
        nsdname: String,
    },
    Cname {
        cname: String,
    },
    Mx {
        preference: u16,
        exchange: String,
    },
    Txt {
        text: String,
    },
    Soa {
        mname: String,
        rname: String,
        serial: u32,
    },
    Ptr {
        ptrdname: String,
    },
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Other {
        code: u16,
    },
}

impl AnswerData {
    /// Record type of this payload, or `None` when it falls outside the
    /// reconnaissance set (AAAA, DNSSEC types, ...).
    pub fn record_type(&self) -> Option<RecordType> {
        match self {
            AnswerData::A { .. } => Some(RecordType::A),
            AnswerData::Ns { .. } => Some(RecordType::NS),
            AnswerData::Cname { .. } => Some(RecordType::CNAME),
            AnswerData::Mx { .. } => Some(RecordType::MX),
            AnswerData::Txt { .. } => Some(RecordType::TXT),
            AnswerData::Soa { .. } => Some(RecordType::SOA),
            AnswerData::Ptr { .. } => Some(RecordType::PTR),
            AnswerData::Srv { .. } => Some(RecordType::SRV),
            AnswerData::Aaaa { .. } | AnswerData::Other { .. } => None,
        }
    }

    pub fn is_cname(&self) -> bool {
        matches!(self, AnswerData::Cname { .. })
    }

    pub fn is_soa(&self) -> bool {
        matches!(self, AnswerData::Soa { .. })
    }
}

impl fmt::Display for AnswerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerData::A { address } => write!(f, "A {}", address),
            AnswerData::Aaaa { address } => write!(f, "AAAA {}", address),
            AnswerData::Ns { nsdname } => write!(f, "NS {}", nsdname),
            AnswerData::Cname { cname } => write!(f, "CNAME {}", cname),
            AnswerData::Mx {
                preference,
                exchange,
            } => write!(f, "MX {} {}", preference, exchange),
            AnswerData::Txt { text } => write!(f, "TXT \"{}\"", text),
            AnswerData::Soa {
                mname,
                rname,
                serial,
            } => write!(f, "SOA {} {} {}", mname, rname, serial),
            AnswerData::Ptr { ptrdname } => write!(f, "PTR {}", ptrdname),
            AnswerData::Srv {
                priority,
                weight,
                port,
                target,
            } => write!(f, "SRV {} {} {} {}", priority, weight, port, target),
            AnswerData::Other { code } => write!(f, "TYPE{}", code),
        }
    }
}

/// One record from a response's answer section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub name: String,
    pub ttl: u32,
    pub data: AnswerData,
}

impl AnswerRecord {
    pub fn new(name: impl Into<String>, ttl: u32, data: AnswerData) -> Self {
        Self {
            name: name.into(),
            ttl,
            data,
        }
    }

    pub fn record_type(&self) -> Option<RecordType> {
        self.data.record_type()
    }
}

impl fmt::Display for AnswerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} IN {}", self.name, self.ttl, self.data)
    }
}
