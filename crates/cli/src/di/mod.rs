pub mod dns;
pub mod use_cases;

pub use dns::DnsServices;
pub use use_cases::UseCases;
