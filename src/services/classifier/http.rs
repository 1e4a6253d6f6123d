//! Remote classifier reached over HTTP
//!
//! API Flow:
//! 1. POST {base_url}/classify with a multipart `image` part
//! 2. Response: `{ success, result: { predicted_hair_type, confidence, confidence_percentage }, timestamp }`

use crate::{
    error::{AppError, AppResult},
    models::{ClassificationResult, ClassifierResponse},
    services::classifier::{HairClassifier, ImageUpload},
};
use reqwest::{
    multipart::{Form, Part},
    Client as HttpClient,
};
use std::time::Duration;

#[derive(Clone)]
pub struct HttpClassifier {
    http_client: HttpClient,
    api_url: String,
}

impl HttpClassifier {
    /// Creates a classifier client with the given per-request timeout
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
        })
    }

    fn classify_url(&self) -> String {
        format!("{}/classify", self.api_url.trim_end_matches('/'))
    }

    /// Turns a decoded classifier body into a result, rejecting unsuccessful scans
    fn interpret(response: ClassifierResponse) -> AppResult<ClassificationResult> {
        if !response.success {
            return Err(AppError::Classification(
                "Classifier reported an unsuccessful scan".to_string(),
            ));
        }

        response
            .result
            .map(ClassificationResult::from)
            .ok_or_else(|| AppError::Classification("Classifier returned no result".to_string()))
    }
}

#[async_trait::async_trait]
impl HairClassifier for HttpClassifier {
    async fn classify(&self, image: ImageUpload) -> AppResult<ClassificationResult> {
        if image.bytes.is_empty() {
            return Err(AppError::InvalidInput("Image cannot be empty".to_string()));
        }

        tracing::debug!(
            file_name = %image.file_name,
            size = image.bytes.len(),
            "Uploading image for classification"
        );

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        let form = Form::new().part("image", part);

        let response = self
            .http_client
            .post(self.classify_url())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Classifier returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw classifier response");

        let decoded: ClassifierResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize classifier response"
            );
            AppError::ExternalApi(format!("Failed to parse classifier response: {}", e))
        })?;

        let result = Self::interpret(decoded)?;

        tracing::info!(
            hair_type = %result.hair_type,
            confidence = result.confidence,
            classifier = self.name(),
            "Classification completed"
        );

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
