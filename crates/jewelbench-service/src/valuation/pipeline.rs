//! Upload → transient file → mesh → metrics → valuation.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use jewelbench_core::error::AppError;
use jewelbench_core::types::Material;
use jewelbench_mesh::{IndexedMesh, MeshAnalyzer, StlMeshAnalyzer};

use super::model::{Analysis, MeshMetrics, ValuationReport};
use crate::upload::{MeshUpload, UploadStaging};

/// Runs the valuation pipeline for uploaded meshes.
#[derive(Debug, Clone)]
pub struct ValuationPipeline {
    analyzer: Arc<dyn MeshAnalyzer>,
    staging: UploadStaging,
}

impl ValuationPipeline {
    /// Creates a pipeline over the given analyzer and staging area.
    pub fn new(analyzer: Arc<dyn MeshAnalyzer>, staging: UploadStaging) -> Self {
        Self { analyzer, staging }
    }

    /// Creates a pipeline using the native STL analyzer.
    pub fn with_stl(staging: UploadStaging) -> Self {
        Self::new(Arc::new(StlMeshAnalyzer::new()), staging)
    }

    /// The mesh analyzer in use.
    pub fn analyzer(&self) -> &dyn MeshAnalyzer {
        self.analyzer.as_ref()
    }

    /// Value an uploaded mesh in `material`.
    pub fn evaluate(
        &self,
        upload: &MeshUpload,
        material: Material,
    ) -> Result<ValuationReport, AppError> {
        self.analyze(upload, material).map(|analysis| analysis.report)
    }

    /// Value an uploaded mesh and keep the loaded mesh for export.
    ///
    /// The transient file is removed before this returns, on success and
    /// on every error path.
    pub fn analyze(&self, upload: &MeshUpload, material: Material) -> Result<Analysis, AppError> {
        let start = Instant::now();
        let mesh = self.load(upload)?;
        let metrics = self.measure(&mesh);
        let report = ValuationReport::new(metrics, material)?;

        info!(
            engine = self.analyzer.name(),
            file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
            material = %material,
            volume_mm3 = report.metrics.volume_mm3,
            is_manifold = report.metrics.is_manifold,
            weight_g = report.valuation.weight_g,
            total_value = report.valuation.total_value,
            duration_ms = start.elapsed().as_millis() as u64,
            "Valuation completed"
        );

        Ok(Analysis { report, mesh })
    }

    /// Compute metrics for an already-loaded mesh.
    pub fn measure(&self, mesh: &IndexedMesh) -> MeshMetrics {
        MeshMetrics {
            volume_mm3: self.analyzer.volume(mesh),
            surface_area_mm2: self.analyzer.area(mesh),
            is_manifold: self.analyzer.is_manifold(mesh),
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            extents: mesh.extents(),
        }
    }

    fn load(&self, upload: &MeshUpload) -> Result<IndexedMesh, AppError> {
        let staged = self.staging.stage(upload)?;
        let loaded = self.analyzer.load_file(staged.path());
        drop(staged);

        loaded.map_err(|e| {
            warn!(
                engine = self.analyzer.name(),
                file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
                error = %e,
                "Mesh load failed"
            );
            AppError::from(e)
        })
    }
}
