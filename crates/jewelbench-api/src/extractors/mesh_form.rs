//! Multipart form carrying a mesh upload and a material.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;

use jewelbench_core::error::AppError;
use jewelbench_core::types::Material;
use jewelbench_service::MeshUpload;

use crate::error::ApiError;
use crate::state::AppState;

/// The `file` and `material` fields of an upload form.
#[derive(Debug, Clone)]
pub struct MeshForm {
    /// Uploaded mesh.
    pub upload: MeshUpload,
    /// Selected material.
    pub material: Material,
}

impl FromRequest<AppState> for MeshForm {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Expected multipart form data: {e}")))?;

        let mut file_name: Option<String> = None;
        let mut data: Option<Bytes> = None;
        let mut material: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("Multipart error", &e))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "file" => {
                    file_name = field.file_name().map(String::from);
                    data = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| multipart_error("Read error", &e))?,
                    );
                }
                "material" => {
                    material = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| multipart_error("Read error", &e))?,
                    );
                }
                _ => {}
            }
        }

        let data = data.ok_or_else(|| AppError::validation("file is required"))?;
        let material = material
            .ok_or_else(|| AppError::validation("material is required"))?
            .parse::<Material>()
            .map_err(AppError::from)?;

        Ok(Self {
            upload: MeshUpload::new(file_name, data),
            material,
        })
    }
}

/// Body-limit failures surface while streaming fields and keep their 413.
fn multipart_error(context: &str, err: &MultipartError) -> AppError {
    let message = format!("{context}: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(message)
    } else {
        AppError::validation(message)
    }
}
