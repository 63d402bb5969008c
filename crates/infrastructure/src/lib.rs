pub mod dns;
pub mod findings;
pub mod input;
pub mod status;
