use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Query timeout: {0}")]
    Timeout(String),

    #[error("No response: {0}")]
    NoResponse(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
