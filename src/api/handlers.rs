use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_context::{CurrentUser, RequestId};
use crate::models::{
    ClassificationResult, DandruffLevel, HairLossStage, HairTip, OilRecommendation, ScanResult,
    UserSelections,
};
use crate::services::{classifier::ImageUpload, recommendations};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub hair_type: String,
    #[serde(default)]
    pub dandruff_level: DandruffLevel,
    #[serde(default)]
    pub hair_loss_stage: HairLossStage,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub oils: Vec<OilRecommendation>,
    pub tips: Vec<HairTip>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub classification: ClassificationResult,
    pub selections: UserSelections,
    pub oils: Vec<OilRecommendation>,
    pub tips: Vec<HairTip>,
    /// Present when the scan was queued for the user's history
    pub scan_id: Option<String>,
    pub saved: bool,
}

/// A stored scan as listed in the user's history
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub scan: ScanResult,
    pub formatted_date: String,
}

impl From<ScanResult> for HistoryEntry {
    fn from(scan: ScanResult) -> Self {
        Self {
            formatted_date: scan.formatted_date(),
            scan,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanCountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteScanResponse {
    pub deleted: bool,
}

/// Parsed multipart scan upload
struct ScanForm {
    image: ImageUpload,
    selections: UserSelections,
}

async fn read_scan_form(mut multipart: Multipart) -> AppResult<ScanForm> {
    let mut image = None;
    let mut selections = UserSelections::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?.to_vec();
                image = Some(ImageUpload::new(file_name, content_type, bytes));
            }
            "dandruff_level" => selections.dandruff_level = field.text().await?.parse()?,
            "hair_loss_stage" => selections.hair_loss_stage = field.text().await?.parse()?,
            other => tracing::debug!(field = %other, "Ignoring unknown multipart field"),
        }
    }

    let image = image.ok_or_else(|| AppError::InvalidInput("Missing image field".to_string()))?;
    Ok(ScanForm { image, selections })
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the oil catalog
pub async fn list_oils() -> Json<Vec<OilRecommendation>> {
    Json(recommendations::catalog().to_vec())
}

/// Recommend oils and tips for an already known hair type
pub async fn recommend(Json(request): Json<RecommendationRequest>) -> Json<RecommendationResponse> {
    let selections = UserSelections::new(request.dandruff_level, request.hair_loss_stage);
    let analysis = recommendations::analyze(&request.hair_type, &selections);

    Json(RecommendationResponse {
        oils: analysis.oils,
        tips: analysis.tips,
    })
}

/// Classify an uploaded photo, derive recommendations and queue the scan for history
pub async fn create_scan(
    State(state): State<AppState>,
    user: CurrentUser,
    request_id: RequestId,
    multipart: Multipart,
) -> AppResult<Json<ScanResponse>> {
    let form = read_scan_form(multipart).await?;

    tracing::info!(
        request_id = %request_id,
        dandruff_level = %form.selections.dandruff_level,
        hair_loss_stage = %form.selections.hair_loss_stage,
        image_bytes = form.image.bytes.len(),
        classifier = state.classifier.name(),
        "Processing scan request"
    );

    let classification = state.classifier.classify(form.image).await?;
    let analysis = recommendations::analyze(&classification.hair_type, &form.selections);

    let scan_id = match user.user_id() {
        Some(user_id) => {
            let scan = ScanResult::new(
                user_id,
                classification.hair_type.as_str(),
                classification.confidence_percentage.as_str(),
                form.selections.dandruff_level.as_str(),
                form.selections.hair_loss_stage.as_str(),
                analysis.oil_names(),
            );
            let scan_id = scan.scan_id.clone();
            state.history_writer.save_in_background(scan).then_some(scan_id)
        }
        None => {
            tracing::info!(request_id = %request_id, "Anonymous scan, skipping history");
            None
        }
    };

    tracing::info!(
        request_id = %request_id,
        hair_type = %classification.hair_type,
        oils = analysis.oils.len(),
        tips = analysis.tips.len(),
        saved = scan_id.is_some(),
        "Scan completed"
    );

    Ok(Json(ScanResponse {
        classification,
        selections: form.selections,
        oils: analysis.oils,
        tips: analysis.tips,
        saved: scan_id.is_some(),
        scan_id,
    }))
}

/// Scan history for the current user, newest first
pub async fn get_history(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let Some(user_id) = user.user_id() else {
        return Ok(Json(Vec::new()));
    };

    let history = state.store.history(user_id).await?;
    Ok(Json(history.into_iter().map(HistoryEntry::from).collect()))
}

/// Most recent scan for the current user
pub async fn get_latest_scan(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Option<HistoryEntry>>> {
    let Some(user_id) = user.user_id() else {
        return Ok(Json(None));
    };

    let latest = state.store.latest(user_id).await?;
    Ok(Json(latest.map(HistoryEntry::from)))
}

/// Number of scans stored for the current user
pub async fn get_scan_count(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ScanCountResponse>> {
    let count = match user.user_id() {
        Some(user_id) => state.store.count(user_id).await?,
        None => 0,
    };

    Ok(Json(ScanCountResponse { count }))
}

/// Delete one of the current user's scans
pub async fn delete_scan(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(scan_id): Path<String>,
) -> AppResult<Json<DeleteScanResponse>> {
    let deleted = match user.user_id() {
        Some(user_id) => state.store.delete(user_id, &scan_id).await?,
        None => false,
    };

    Ok(Json(DeleteScanResponse { deleted }))
}
