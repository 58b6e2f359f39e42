//! Valuation result types and arithmetic.

use serde::Serialize;

use jewelbench_core::error::AppError;
use jewelbench_core::types::Material;
use jewelbench_mesh::IndexedMesh;
use jewelbench_mesh::mesh::Extents;

use super::display::ValuationDisplay;
use super::tables;

/// Solid properties of a loaded mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshMetrics {
    /// Enclosed volume in mm³.
    pub volume_mm3: f64,
    /// Surface area in mm².
    pub surface_area_mm2: f64,
    /// Whether the surface is closed.
    pub is_manifold: bool,
    /// Distinct vertices after welding.
    pub vertex_count: usize,
    /// Triangle count.
    pub face_count: usize,
    /// Bounding-box size in mm.
    pub extents: Option<Extents>,
}

/// Weight and price of a volume of metal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    /// The priced material.
    pub material: Material,
    /// Density used, g/cm³.
    pub density_g_cm3: f64,
    /// Spot price used, ₹/g.
    pub spot_price_per_g: f64,
    /// Estimated weight in grams.
    pub weight_g: f64,
    /// Estimated value in ₹.
    pub total_value: f64,
}

impl Valuation {
    /// Price `volume_mm3` of `material`.
    ///
    /// `weight = volume / 1000 * density`, `value = weight * spot price`.
    pub fn compute(volume_mm3: f64, material: Material) -> Result<Self, AppError> {
        let density_g_cm3 = tables::density(material)?;
        let spot_price_per_g = tables::spot_price(material)?;
        let weight_g = volume_mm3 / 1000.0 * density_g_cm3;
        Ok(Self {
            material,
            density_g_cm3,
            spot_price_per_g,
            weight_g,
            total_value: weight_g * spot_price_per_g,
        })
    }
}

/// Price a known volume without a mesh.
pub fn quote(volume_mm3: f64, material: Material) -> Result<Valuation, AppError> {
    if !volume_mm3.is_finite() || volume_mm3 < 0.0 {
        return Err(AppError::validation(format!(
            "Volume must be a finite, non-negative number of mm³ (got {volume_mm3})"
        )));
    }
    Valuation::compute(volume_mm3, material)
}

/// Everything returned for one uploaded design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationReport {
    /// Selected material.
    pub material: Material,
    /// Mesh properties.
    pub metrics: MeshMetrics,
    /// Weight and price.
    pub valuation: Valuation,
    /// Formatted strings for presentation.
    pub display: ValuationDisplay,
}

impl ValuationReport {
    /// Assemble a report from metrics, pricing them in `material`.
    pub fn new(metrics: MeshMetrics, material: Material) -> Result<Self, AppError> {
        let valuation = Valuation::compute(metrics.volume_mm3, material)?;
        let display = ValuationDisplay::new(&metrics, &valuation);
        Ok(Self {
            material,
            metrics,
            valuation,
            display,
        })
    }
}

/// A report together with the mesh it was computed from.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The valuation report.
    pub report: ValuationReport,
    /// The loaded mesh, for the export stage.
    pub mesh: IndexedMesh,
}
