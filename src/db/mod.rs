pub mod memory;
pub mod postgres;
pub mod writer;

pub use memory::MemoryScanStore;
pub use postgres::{create_pool, PgScanStore};
pub use writer::{HistoryWriter, HistoryWriterHandle};

use crate::{error::AppResult, models::ScanResult};

/// Storage for per-user scan history
///
/// Every query is scoped to a user. The store never decides who the user is;
/// callers pass the identity resolved upstream.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ScanHistoryStore: Send + Sync {
    /// Inserts or replaces a scan, keyed by its scan ID
    async fn save(&self, scan: &ScanResult) -> AppResult<()>;

    /// All scans for a user, newest first
    async fn history(&self, user_id: &str) -> AppResult<Vec<ScanResult>>;

    /// The most recent scan for a user
    async fn latest(&self, user_id: &str) -> AppResult<Option<ScanResult>>;

    /// Deletes a scan if it belongs to the user.
    ///
    /// Returns `false` when the scan does not exist or is owned by someone else.
    async fn delete(&self, user_id: &str, scan_id: &str) -> AppResult<bool>;

    /// Number of scans stored for a user
    async fn count(&self, user_id: &str) -> AppResult<u64>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}
