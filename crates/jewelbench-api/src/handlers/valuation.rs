//! Valuation handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use jewelbench_core::error::AppError;
use jewelbench_core::types::Material;
use jewelbench_service::{Valuation, ValuationReport, quote};

use crate::dto::request::QuoteRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::MeshForm;
use crate::handlers::run_blocking;
use crate::state::AppState;

/// POST /api/valuations (multipart: `file`, `material`)
pub async fn evaluate_upload(
    State(state): State<AppState>,
    form: MeshForm,
) -> ApiResult<Json<ApiResponse<ValuationReport>>> {
    let pipeline = state.pipeline.clone();
    let report = run_blocking(move || pipeline.evaluate(&form.upload, form.material)).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// POST /api/valuations/quote
pub async fn quote_volume(Json(req): Json<QuoteRequest>) -> ApiResult<Json<ApiResponse<Valuation>>> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid quote request: {e}")))?;
    let material: Material = req.material.parse().map_err(AppError::from)?;
    Ok(Json(ApiResponse::ok(quote(req.volume_mm3, material)?)))
}
