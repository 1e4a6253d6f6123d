//! Hair classification abstraction
//!
//! The photo is analyzed by a remote service; this module only defines the
//! seam and one HTTP implementation. Callers receive a typed
//! [`ClassificationResult`] and never see the wire format.

use crate::{error::AppResult, models::ClassificationResult};

pub mod http;

pub use http::HttpClassifier;

/// Default file name sent when the upload carries none
pub const DEFAULT_FILE_NAME: &str = "image.jpg";

/// Default content type sent when the upload carries none
pub const DEFAULT_CONTENT_TYPE: &str = "image/*";

/// An image to classify, already read into memory
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Builds an upload, falling back to default name and content type
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            content_type: content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            bytes,
        }
    }
}

/// Trait for hair classifiers
#[async_trait::async_trait]
pub trait HairClassifier: Send + Sync {
    /// Classify a single image
    async fn classify(&self, image: ImageUpload) -> AppResult<ClassificationResult>;

    /// Classifier name for logging and debugging
    fn name(&self) -> &'static str;
}
