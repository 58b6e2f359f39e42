//! CAD export orchestration.

use tracing::info;

use jewelbench_cad::{CadExporter, ExportArtifact};
use jewelbench_core::error::AppError;
use jewelbench_core::types::Material;

use crate::upload::MeshUpload;
use crate::valuation::{ValuationPipeline, ValuationReport};

/// A written export and the report of the mesh it holds.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Metrics and valuation of the exported mesh.
    pub report: ValuationReport,
    /// The file on disk.
    pub artifact: ExportArtifact,
}

/// Loads an upload through the valuation pipeline and writes it as a
/// layered CAD document.
#[derive(Debug, Clone)]
pub struct ExportService {
    pipeline: ValuationPipeline,
    exporter: CadExporter,
}

impl ExportService {
    /// Creates a new export service.
    pub fn new(pipeline: ValuationPipeline, exporter: CadExporter) -> Self {
        Self { pipeline, exporter }
    }

    /// Analyze the upload and export its mesh tagged with `material`.
    pub fn export(&self, upload: &MeshUpload, material: Material) -> Result<ExportOutcome, AppError> {
        let analysis = self.pipeline.analyze(upload, material)?;
        let artifact = self.exporter.export(&analysis.mesh, material)?;

        info!(
            export_id = %artifact.id(),
            material = %material,
            download_name = %artifact.download_name(),
            "Export ready"
        );

        Ok(ExportOutcome {
            report: analysis.report,
            artifact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jewelbench_cad::codec;
    use jewelbench_core::error::ErrorKind;
    use jewelbench_mesh::{IndexedMesh, stl};

    use crate::upload::UploadStaging;

    fn service(dir: &std::path::Path) -> ExportService {
        ExportService::new(
            ValuationPipeline::with_stl(UploadStaging::new(dir, 1 << 20)),
            CadExporter::new(dir),
        )
    }

    #[test]
    fn test_export_cube() {
        let dir = tempfile::tempdir().unwrap();
        let upload = MeshUpload::new(
            Some("cube.stl".into()),
            stl::encode_binary(&IndexedMesh::cube(10.0)),
        );

        let outcome = service(dir.path())
            .export(&upload, Material::Gold18K)
            .unwrap();
        assert_eq!(outcome.artifact.download_name(), "jewelbench_Gold_18K.3mf");

        let doc = codec::decode(&outcome.artifact.read_bytes().unwrap()).unwrap();
        let names: Vec<&str> = doc.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Metal", "Stones", "Prongs"]);
        assert_eq!(doc.objects.len(), 1);
        assert_eq!(doc.objects[0].vertices.len(), 8);
        assert_eq!(doc.objects[0].faces.len(), 12);
        assert_eq!(doc.objects[0].metadata("material"), Some("Gold 18K"));

        // Only the export remains; the staged upload is gone
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        drop(outcome);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_of_garbage_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let upload = MeshUpload::new(Some("bad.stl".into()), vec![7u8; 40]);
        let err = service(dir.path())
            .export(&upload, Material::Platinum)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Engine);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
