use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record types the reconnaissance engine knows how to ask for.
///
/// `AXFR` is a query-only type: it never appears on an answer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    MX,
    TXT,
    SOA,
    PTR,
    SRV,
    AXFR,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::SOA => "SOA",
            RecordType::PTR => "PTR",
            RecordType::SRV => "SRV",
            RecordType::AXFR => "AXFR",
        }
    }

    /// Convert from wire format number (RFC 1035)
    ///
    /// Returns `None` for types outside the reconnaissance set.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(RecordType::A),
            2 => Some(RecordType::NS),
            5 => Some(RecordType::CNAME),
            6 => Some(RecordType::SOA),
            12 => Some(RecordType::PTR),
            15 => Some(RecordType::MX),
            16 => Some(RecordType::TXT),
            33 => Some(RecordType::SRV),
            252 => Some(RecordType::AXFR),
            _ => None,
        }
    }

    /// Convert to wire format number
    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::PTR => 12,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::SRV => 33,
            RecordType::AXFR => 252,
        }
    }

    /// Label used when a lookup of this type is persisted as a finding.
    pub fn finding_kind(&self) -> &'static str {
        match self {
            RecordType::A => "DNS A records",
            RecordType::NS => "DNS NS records",
            RecordType::CNAME => "DNS CNAME records",
            RecordType::MX => "DNS MX records",
            RecordType::TXT => "DNS TXT records",
            RecordType::SOA => "DNS SOA records",
            RecordType::PTR => "DNS PTR records",
            RecordType::SRV => "DNS SRV records",
            RecordType::AXFR => "DNS AXFR records",
        }
    }

    /// Types that can be fetched with a plain single-record lookup.
    pub fn lookup_types() -> &'static [RecordType] {
        &[
            RecordType::A,
            RecordType::CNAME,
            RecordType::NS,
            RecordType::MX,
            RecordType::SOA,
            RecordType::TXT,
        ]
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "NS" => Ok(RecordType::NS),
            "CNAME" => Ok(RecordType::CNAME),
            "MX" => Ok(RecordType::MX),
            "TXT" => Ok(RecordType::TXT),
            "SOA" => Ok(RecordType::SOA),
            "PTR" => Ok(RecordType::PTR),
            "SRV" => Ok(RecordType::SRV),
            "AXFR" => Ok(RecordType::AXFR),
            _ => Err(format!("Invalid record type: {}", s)),
        }
    }
}
