//! Export an STL file as a layered CAD document.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use jewelbench_cad::CadExporter;
use jewelbench_core::error::AppError;
use jewelbench_service::{ExportService, MeshUpload};

use crate::output::{self, OutputFormat};

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// STL file to export
    pub file: PathBuf,

    /// Material recorded in the document metadata
    #[arg(short, long)]
    pub material: String,

    /// Destination path (default: ./jewelbench_<Material>.3mf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportSummary {
    path: PathBuf,
    material: String,
    size_bytes: u64,
    vertices: usize,
    faces: usize,
}

/// Execute the export command
pub fn execute(args: &ExportArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let material = super::parse_material(&args.material)?;
    let upload = MeshUpload::from_path(&args.file)?;

    let service = ExportService::new(
        super::build_pipeline(&config),
        CadExporter::new(config.storage.temp_path()),
    );
    let outcome = service.export(&upload, material)?;

    let dest = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(outcome.artifact.download_name()));
    let size_bytes = outcome.artifact.size();
    let path = outcome.artifact.persist(&dest)?;

    let summary = ExportSummary {
        path,
        material: material.name().to_string(),
        size_bytes,
        vertices: outcome.report.metrics.vertex_count,
        faces: outcome.report.metrics.face_count,
    };

    match format {
        OutputFormat::Json => output::print_json(&summary),
        OutputFormat::Table => {
            output::print_success(&format!("Exported {}", summary.path.display()));
            output::print_kv("Material", &summary.material);
            output::print_kv("Layers", "Metal, Stones, Prongs");
            output::print_kv(
                "Vertices / Faces",
                &format!("{} / {}", summary.vertices, summary.faces),
            );
            output::print_kv("Size", &format!("{} bytes", summary.size_bytes));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jewelbench_mesh::{IndexedMesh, stl};

    #[test]
    fn test_export_persists_to_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cube.stl");
        std::fs::write(&file, stl::encode_binary(&IndexedMesh::cube(4.0))).unwrap();
        let dest = dir.path().join("out.3mf");

        let args = ExportArgs {
            file,
            material: "Gold 22K".to_string(),
            output: Some(dest.clone()),
        };
        execute(&args, "test", OutputFormat::Json).unwrap();

        let doc = jewelbench_cad::codec::decode(&std::fs::read(&dest).unwrap()).unwrap();
        assert_eq!(doc.objects[0].metadata("material"), Some("Gold 22K"));
    }
}
