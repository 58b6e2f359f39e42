//! Material table handler.

use axum::Json;

use jewelbench_service::{MaterialInfo, material_catalog};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;

/// GET /api/materials
pub async fn list_materials() -> ApiResult<Json<ApiResponse<Vec<MaterialInfo>>>> {
    Ok(Json(ApiResponse::ok(material_catalog()?)))
}
