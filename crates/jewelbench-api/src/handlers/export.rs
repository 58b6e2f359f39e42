//! CAD export handler.

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;

use jewelbench_cad::MEDIA_TYPE;
use jewelbench_core::error::AppError;

use crate::error::ApiResult;
use crate::extractors::MeshForm;
use crate::handlers::run_blocking;
use crate::state::AppState;

/// POST /api/exports (multipart: `file`, `material`)
///
/// Responds with the 3MF package as an attachment. The file on disk
/// is removed once its bytes are read.
pub async fn export_upload(State(state): State<AppState>, form: MeshForm) -> ApiResult<Response> {
    let service = state.export_service.clone();
    let (file_name, data) = run_blocking(move || {
        let outcome = service.export(&form.upload, form.material)?;
        let data = outcome.artifact.read_bytes()?;
        Ok((outcome.artifact.download_name(), data))
    })
    .await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, MEDIA_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}
