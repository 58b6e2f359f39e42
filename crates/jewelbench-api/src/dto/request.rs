//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/valuations/quote`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    /// Metal volume in mm³.
    #[validate(range(min = 0.0, message = "volume_mm3 must be non-negative"))]
    pub volume_mm3: f64,
    /// Material display name, e.g. `Gold 18K`.
    #[validate(length(min = 1, message = "material is required"))]
    pub material: String,
}
