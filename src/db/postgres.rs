use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};

use crate::{db::ScanHistoryStore, error::AppResult, models::ScanResult};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

const SELECT_COLUMNS: &str = "scan_id, user_id, hair_type, confidence, dandruff_level, \
     hair_loss_stage, recommended_oils, timestamp";

/// Scan history backed by the `scan_results` table
#[derive(Clone)]
pub struct PgScanStore {
    pool: PgPool,
}

impl PgScanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies pending migrations from `migrations/`
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    fn decode_row(row: &PgRow) -> Result<ScanResult, sqlx::Error> {
        Ok(ScanResult {
            user_id: row.try_get("user_id")?,
            hair_type: row.try_get("hair_type")?,
            confidence: row.try_get("confidence")?,
            dandruff_level: row.try_get("dandruff_level")?,
            hair_loss_stage: row.try_get("hair_loss_stage")?,
            recommended_oils: row.try_get("recommended_oils")?,
            timestamp: row.try_get("timestamp")?,
            scan_id: row.try_get("scan_id")?,
        })
    }

    /// Decodes rows one by one, skipping any that fail to decode
    fn decode_rows(rows: Vec<PgRow>) -> Vec<ScanResult> {
        rows.iter()
            .filter_map(|row| match Self::decode_row(row) {
                Ok(scan) => Some(scan),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed scan record");
                    None
                }
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl ScanHistoryStore for PgScanStore {
    async fn save(&self, scan: &ScanResult) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO scan_results
                (scan_id, user_id, hair_type, confidence, dandruff_level,
                 hair_loss_stage, recommended_oils, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (scan_id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                hair_type = EXCLUDED.hair_type,
                confidence = EXCLUDED.confidence,
                dandruff_level = EXCLUDED.dandruff_level,
                hair_loss_stage = EXCLUDED.hair_loss_stage,
                recommended_oils = EXCLUDED.recommended_oils,
                timestamp = EXCLUDED.timestamp
            "#,
        )
        .bind(&scan.scan_id)
        .bind(&scan.user_id)
        .bind(&scan.hair_type)
        .bind(&scan.confidence)
        .bind(&scan.dandruff_level)
        .bind(&scan.hair_loss_stage)
        .bind(&scan.recommended_oils)
        .bind(scan.timestamp)
        .execute(&self.pool)
        .await?;

        tracing::debug!(scan_id = %scan.scan_id, "Scan result saved");
        Ok(())
    }

    async fn history(&self, user_id: &str) -> AppResult<Vec<ScanResult>> {
        let query = format!(
            "SELECT {} FROM scan_results WHERE user_id = $1 ORDER BY timestamp DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let total = rows.len();
        let history = Self::decode_rows(rows);

        if history.len() != total {
            tracing::warn!(
                user_id = %user_id,
                skipped = total - history.len(),
                "Some scan records could not be decoded"
            );
        }

        Ok(history)
    }

    async fn latest(&self, user_id: &str) -> AppResult<Option<ScanResult>> {
        let query = format!(
            "SELECT {} FROM scan_results WHERE user_id = $1 ORDER BY timestamp DESC LIMIT 1",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Self::decode_rows(vec![row])).and_then(|mut scans| scans.pop()))
    }

    async fn delete(&self, user_id: &str, scan_id: &str) -> AppResult<bool> {
        let owner: Option<String> =
            sqlx::query_scalar("SELECT user_id FROM scan_results WHERE scan_id = $1")
                .bind(scan_id)
                .fetch_optional(&self.pool)
                .await?;

        match owner {
            Some(owner) if owner == user_id => {
                sqlx::query("DELETE FROM scan_results WHERE scan_id = $1 AND user_id = $2")
                    .bind(scan_id)
                    .bind(user_id)
                    .execute(&self.pool)
                    .await?;
                tracing::info!(scan_id = %scan_id, "Scan result deleted");
                Ok(true)
            }
            Some(_) => {
                tracing::warn!(scan_id = %scan_id, "Refusing to delete scan owned by another user");
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, user_id: &str) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scan_results WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
