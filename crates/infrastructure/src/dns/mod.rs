pub mod forwarding;
pub mod nameservers;
pub mod query_client;
pub mod reverse;
pub mod transport;
pub mod zone_transfer;

pub use nameservers::NameserverSelector;
pub use query_client::WireQueryClient;
pub use reverse::ip_to_reverse_domain;
