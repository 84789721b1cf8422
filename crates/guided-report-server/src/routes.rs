//! HTTP surface of the analysis service.

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::routing::{get, post};
use guided_report_models::{
    ANALYZE_PATH, AnalyzeRequest, AnalyzeResponse, HEALTH_PATH, HealthStatus,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::concerns::Analyzer;
use crate::error::ApiError;

/// State shared across all handlers.
pub struct AppState {
    /// Produces the analyses.
    pub analyzer: Arc<dyn Analyzer>,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(ANALYZE_PATH, post(analyze))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /health`
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

/// `POST /analyze` - turn a concern into a markdown business case.
async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::MissingConcern(e.body_text()))?;

    info!(chars = req.concern.char_count(), "analyze request received");
    let analysis = state.analyzer.analyze(&req.concern).await?;
    info!(chars = analysis.chars().count(), "analysis produced");

    Ok(Json(AnalyzeResponse { analysis }))
}
