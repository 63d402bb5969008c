//! Ferrous Recon Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod finding;
pub mod query_outcome;
pub mod wordlists;

pub use config::{CliOverrides, Config, ConfigError, ResolverConfig, Transport};
pub use dns_query::QueryTarget;
pub use dns_record::{
    AnswerData, AnswerRecord, EnumerationResult, ExtractedRecord, RecordType, SrvData,
    ZoneTransfer,
};
pub use errors::DomainError;
pub use finding::{Finding, FindingData};
pub use query_outcome::{DnsAnswer, FailureKind, QueryOutcome, ResponseCode};
