use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted scan, one per completed analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub user_id: String,
    pub hair_type: String,
    /// Confidence percentage string as reported by the classifier
    pub confidence: String,
    pub dandruff_level: String,
    pub hair_loss_stage: String,
    /// Display names of the recommended oils
    pub recommended_oils: Vec<String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub scan_id: String,
}

impl ScanResult {
    /// Creates a scan stamped with the current time and a fresh scan ID
    pub fn new(
        user_id: impl Into<String>,
        hair_type: impl Into<String>,
        confidence: impl Into<String>,
        dandruff_level: impl Into<String>,
        hair_loss_stage: impl Into<String>,
        recommended_oils: Vec<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            hair_type: hair_type.into(),
            confidence: confidence.into(),
            dandruff_level: dandruff_level.into(),
            hair_loss_stage: hair_loss_stage.into(),
            recommended_oils,
            timestamp: Utc::now().timestamp_millis(),
            scan_id: Uuid::new_v4().to_string(),
        }
    }

    /// Renders the timestamp as e.g. "Mar 05, 2024 at 02:30 PM" (UTC)
    pub fn formatted_date(&self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
            .unwrap_or_default()
            .format("%b %d, %Y at %I:%M %p")
            .to_string()
    }
}
