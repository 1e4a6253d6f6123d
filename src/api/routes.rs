use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_context::{make_span_with_request_id, request_context_middleware};

/// Largest accepted image upload
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_context_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/oils", get(handlers::list_oils))
        .route("/recommendations", post(handlers::recommend))
        .route(
            "/scans",
            post(handlers::create_scan).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Scan history
        .route("/history", get(handlers::get_history))
        .route("/history/latest", get(handlers::get_latest_scan))
        .route("/history/count", get(handlers::get_scan_count))
        .route("/history/:scan_id", delete(handlers::delete_scan))
}
