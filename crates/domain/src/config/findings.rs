use serde::{Deserialize, Serialize};

/// Persistence of discovered records (the findings store)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FindingsConfig {
    /// Save every non-empty result as a finding (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// SQLite database file holding the findings
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for FindingsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            database_path: default_database_path(),
        }
    }
}

impl FindingsConfig {
    pub fn database_url(&self) -> String {
        if self.database_path.starts_with("sqlite:") {
            self.database_path.clone()
        } else {
            format!("sqlite:{}", self.database_path)
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_database_path() -> String {
    "ferrous-recon.db".to_string()
}
