use serde::{Deserialize, Serialize};

pub mod product;
pub mod scan_result;
pub mod selections;

pub use product::{HairTip, OilRecommendation};
pub use scan_result::ScanResult;
pub use selections::{DandruffLevel, HairLossStage, UserSelections};

/// Typed result of a hair classification, as consumed by the rest of the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    /// Free-form predicted category (e.g. "curly"); matched case-insensitively
    pub hair_type: String,
    pub confidence: f32,
    /// Human readable confidence as reported by the classifier (e.g. "87.5%")
    pub confidence_percentage: String,
}

// ============================================================================
// Classifier API Types
// ============================================================================

/// Raw response body from the classification endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Option<ClassifierPrediction>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Prediction payload nested inside a successful classifier response
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierPrediction {
    pub predicted_hair_type: String,
    pub confidence: f32,
    pub confidence_percentage: String,
}

impl From<ClassifierPrediction> for ClassificationResult {
    fn from(prediction: ClassifierPrediction) -> Self {
        ClassificationResult {
            hair_type: prediction.predicted_hair_type,
            confidence: prediction.confidence,
            confidence_percentage: prediction.confidence_percentage,
        }
    }
}

/// Oils and tips derived for a single scan
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub oils: Vec<OilRecommendation>,
    pub tips: Vec<HairTip>,
}

impl Analysis {
    /// Display names of the recommended oils, in recommendation order
    pub fn oil_names(&self) -> Vec<String> {
        self.oils.iter().map(|oil| oil.name.to_string()).collect()
    }
}
