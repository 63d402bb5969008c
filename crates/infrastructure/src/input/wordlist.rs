use ferrous_recon_domain::DomainError;
use std::path::Path;
use tracing::debug;

/// Reads candidate labels (subdomains, TLDs) one per line.
pub struct WordlistReader;

impl WordlistReader {
    pub async fn read(path: &Path) -> Result<Vec<String>, DomainError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::InputError(format!("Cannot read wordlist {}: {}", path.display(), e))
        })?;

        let entries = Self::parse(&content);
        debug!(path = %path.display(), entries = entries.len(), "Wordlist loaded");
        Ok(entries)
    }

    /// Trimmed lines, minus blanks and `#` comments.
    pub fn parse(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }
}
