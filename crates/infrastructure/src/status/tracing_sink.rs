use ferrous_recon_application::ports::StatusSink;
use tracing::{error, info, warn};

/// Status messages as log events on the `status` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatusSink;

impl StatusSink for TracingStatusSink {
    fn status(&self, message: &str) {
        info!(target: "status", "[*] {}", message);
    }

    fn good(&self, message: &str) {
        info!(target: "status", "[+] {}", message);
    }

    fn warning(&self, message: &str) {
        warn!(target: "status", "[!] {}", message);
    }

    fn error(&self, message: &str) {
        error!(target: "status", "[-] {}", message);
    }
}
