//! Ferrous Recon Application Layer
//!
//! Ports the enumerators depend on, the shared query/extraction services and
//! one use case per enumeration technique.
pub mod ports;
pub mod services;
pub mod use_cases;
