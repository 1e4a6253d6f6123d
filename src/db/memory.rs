use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{db::ScanHistoryStore, error::AppResult, models::ScanResult};

/// Process-local scan history, keyed by scan ID
#[derive(Clone, Default)]
pub struct MemoryScanStore {
    scans: Arc<RwLock<HashMap<String, ScanResult>>>,
}

impl MemoryScanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ScanHistoryStore for MemoryScanStore {
    async fn save(&self, scan: &ScanResult) -> AppResult<()> {
        let mut scans = self.scans.write().await;
        scans.insert(scan.scan_id.clone(), scan.clone());
        Ok(())
    }

    async fn history(&self, user_id: &str) -> AppResult<Vec<ScanResult>> {
        let scans = self.scans.read().await;
        let mut history: Vec<ScanResult> = scans
            .values()
            .filter(|scan| scan.user_id == user_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(history)
    }

    async fn latest(&self, user_id: &str) -> AppResult<Option<ScanResult>> {
        let scans = self.scans.read().await;
        Ok(scans
            .values()
            .filter(|scan| scan.user_id == user_id)
            .max_by_key(|scan| scan.timestamp)
            .cloned())
    }

    async fn delete(&self, user_id: &str, scan_id: &str) -> AppResult<bool> {
        let mut scans = self.scans.write().await;
        let owned_by_user = scans.get(scan_id).map(|scan| scan.user_id == user_id);

        match owned_by_user {
            Some(true) => {
                scans.remove(scan_id);
                Ok(true)
            }
            Some(false) => {
                tracing::warn!(scan_id = %scan_id, "Refusing to delete scan owned by another user");
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, user_id: &str) -> AppResult<u64> {
        let scans = self.scans.read().await;
        Ok(scans.values().filter(|scan| scan.user_id == user_id).count() as u64)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(user_id: &str, scan_id: &str, timestamp: i64) -> ScanResult {
        ScanResult {
            user_id: user_id.to_string(),
            hair_type: "dry".to_string(),
            confidence: "80%".to_string(),
            dandruff_level: "Low".to_string(),
            hair_loss_stage: "Stage 1".to_string(),
            recommended_oils: vec!["Moroccanoil".to_string()],
            timestamp,
            scan_id: scan_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_user_scoped() {
        let store = MemoryScanStore::new();
        store.save(&scan("alice", "a1", 100)).await.unwrap();
        store.save(&scan("alice", "a2", 300)).await.unwrap();
        store.save(&scan("alice", "a3", 200)).await.unwrap();
        store.save(&scan("bob", "b1", 400)).await.unwrap();

        let history = store.history("alice").await.unwrap();
        let ids: Vec<_> = history.iter().map(|s| s.scan_id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a3", "a1"]);

        assert_eq!(store.count("alice").await.unwrap(), 3);
        assert_eq!(store.count("carol").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_latest() {
        let store = MemoryScanStore::new();
        assert!(store.latest("alice").await.unwrap().is_none());

        tokio_test::assert_ok!(store.save(&scan("alice", "a1", 100)).await);
        tokio_test::assert_ok!(store.save(&scan("alice", "a2", 300)).await);

        let latest = store.latest("alice").await.unwrap().unwrap();
        assert_eq!(latest.scan_id, "a2");
    }

    #[tokio::test]
    async fn test_save_replaces_same_scan_id() {
        let store = MemoryScanStore::new();
        store.save(&scan("alice", "a1", 100)).await.unwrap();
        store.save(&scan("alice", "a1", 500)).await.unwrap();

        assert_eq!(store.count("alice").await.unwrap(), 1);
        assert_eq!(store.latest("alice").await.unwrap().unwrap().timestamp, 500);
    }

    #[tokio::test]
    async fn test_delete_checks_ownership() {
        let store = MemoryScanStore::new();
        store.save(&scan("alice", "a1", 100)).await.unwrap();

        assert!(!store.delete("bob", "a1").await.unwrap());
        assert_eq!(store.count("alice").await.unwrap(), 1);

        assert!(store.delete("alice", "a1").await.unwrap());
        assert!(!store.delete("alice", "a1").await.unwrap());
        assert_eq!(store.count("alice").await.unwrap(), 0);
    }
}
