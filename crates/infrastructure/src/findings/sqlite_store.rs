use async_trait::async_trait;
use ferrous_recon_application::ports::FindingsStore;
use ferrous_recon_domain::{DomainError, Finding};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, instrument};

type FindingRow = (String, String, String, String);

/// A finding as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFinding {
    pub target: String,
    pub kind: String,
    pub data: serde_json::Value,
    pub created_at: String,
}

/// Findings persisted as JSON rows. Recording the same `(target, kind, data)`
/// twice keeps a single row.
pub struct SqliteFindingsStore {
    pool: SqlitePool,
}

impl SqliteFindingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `database_url` and makes
    /// sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            // Avoid SQLITE_BUSY when pooled workers record concurrently
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(|e| {
                error!(error = %e, url = %database_url, "Failed to open findings database");
                DomainError::DatabaseError(e.to_string())
            })?;

        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS findings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                target TEXT NOT NULL,
                kind TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_findings_unique
             ON findings (target, kind, data)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_for_target(&self, target: &str) -> Result<Vec<StoredFinding>, DomainError> {
        let rows = sqlx::query_as::<_, FindingRow>(
            "SELECT target, kind, data, created_at FROM findings
             WHERE target = ? ORDER BY id",
        )
        .bind(target)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_finding).collect()
    }

    pub async fn count(&self) -> Result<i64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM findings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        Ok(count)
    }

    fn row_to_finding(row: FindingRow) -> Result<StoredFinding, DomainError> {
        let (target, kind, data, created_at) = row;
        let data = serde_json::from_str(&data)
            .map_err(|e| DomainError::DatabaseError(format!("Corrupt finding data: {}", e)))?;

        Ok(StoredFinding {
            target,
            kind,
            data,
            created_at,
        })
    }
}

#[async_trait]
impl FindingsStore for SqliteFindingsStore {
    #[instrument(
        skip(self, finding),
        fields(finding_target = %finding.target, kind = %finding.kind)
    )]
    async fn record(&self, finding: Finding) -> Result<(), DomainError> {
        let data = serde_json::to_string(&finding.data)
            .map_err(|e| DomainError::DatabaseError(format!("Failed to encode finding: {}", e)))?;
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let result = sqlx::query(
            "INSERT OR IGNORE INTO findings (target, kind, data, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&finding.target)
        .bind(&finding.kind)
        .bind(&data)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to record finding");
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!(inserted = result.rows_affected(), "Finding recorded");
        Ok(())
    }
}
