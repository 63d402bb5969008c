use super::{AnswerRecord, DomainError};
use std::fmt;

/// Response code carried by a parsed reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    NotAuth,
    Other(u16),
}

impl ResponseCode {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            9 => ResponseCode::NotAuth,
            other => ResponseCode::Other(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answer section of a reply, plus the rcode it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub rcode: ResponseCode,
    pub answers: Vec<AnswerRecord>,
}

impl DnsAnswer {
    pub fn new(rcode: ResponseCode, answers: Vec<AnswerRecord>) -> Self {
        Self { rcode, answers }
    }
}

/// Classification of a query that produced no usable reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Malformed nameserver or query argument
    ConfigError,
    ConnectionRefused,
    Timeout,
    /// Nothing usable came back (unparsable, mismatched or refused reply)
    NoResponse,
    /// Any other socket failure
    TransportError,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ConfigError => "config_error",
            FailureKind::ConnectionRefused => "connection_refused",
            FailureKind::Timeout => "timeout",
            FailureKind::NoResponse => "no_response",
            FailureKind::TransportError => "transport_error",
        }
    }

    /// Maps a domain error onto the failure taxonomy of the query boundary.
    pub fn classify(error: &DomainError) -> Self {
        match error {
            DomainError::ConfigError(_) | DomainError::InvalidDomainName(_) => {
                FailureKind::ConfigError
            }
            DomainError::ConnectionRefused(_) => FailureKind::ConnectionRefused,
            DomainError::Timeout(_) => FailureKind::Timeout,
            DomainError::NoResponse(_) | DomainError::InvalidDnsResponse(_) => {
                FailureKind::NoResponse
            }
            _ => FailureKind::TransportError,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a single query at the client boundary. Failures are values here,
/// never errors that propagate past the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Success(DnsAnswer),
    /// A valid reply with an empty answer section
    Empty,
    Failure { kind: FailureKind, message: String },
}

impl QueryOutcome {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        QueryOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Builds the outcome for a parsed reply: an empty answer section is
    /// `Empty`, whatever the rcode.
    pub fn from_answer(answer: DnsAnswer) -> Self {
        if answer.answers.is_empty() {
            QueryOutcome::Empty
        } else {
            QueryOutcome::Success(answer)
        }
    }

    pub fn from_error(error: &DomainError) -> Self {
        QueryOutcome::Failure {
            kind: FailureKind::classify(error),
            message: error.to_string(),
        }
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        match self {
            QueryOutcome::Success(answer) => &answer.answers,
            _ => &[],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Success(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            QueryOutcome::Failure { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
