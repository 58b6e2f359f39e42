//! Value an STL file.

use std::path::PathBuf;

use clap::Args;

use jewelbench_core::error::AppError;
use jewelbench_service::{MeshUpload, ValuationReport};

use crate::output::{self, OutputFormat};

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// STL file to analyze
    pub file: PathBuf,

    /// Material to price the design in (e.g. "Gold 18K")
    #[arg(short, long)]
    pub material: String,
}

/// Execute the analyze command
pub fn execute(args: &AnalyzeArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let material = super::parse_material(&args.material)?;
    let upload = MeshUpload::from_path(&args.file)?;

    let report = super::build_pipeline(&config).evaluate(&upload, material)?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => print_report(&args.file, &report),
    }
    Ok(())
}

fn print_report(file: &std::path::Path, report: &ValuationReport) {
    let metrics = &report.metrics;
    let display = &report.display;

    output::print_heading(&format!("Design: {}", file.display()));
    output::print_kv("Material", report.material.name());
    output::print_kv("Volume", &display.volume);
    output::print_kv("Surface Area", &display.surface_area);
    output::print_kv("Manifold", &display.manifold);
    output::print_kv(
        "Vertices / Faces",
        &format!("{} / {}", metrics.vertex_count, metrics.face_count),
    );
    if let Some(ext) = metrics.extents {
        output::print_kv(
            "Bounding Box",
            &format!("{:.2} x {:.2} x {:.2} mm", ext.x, ext.y, ext.z),
        );
    }
    output::print_kv("Estimated Weight", &display.weight);
    output::print_kv("Estimated Value", &display.total_value);

    if !metrics.is_manifold {
        output::print_warning("Mesh is not watertight; volume and weight may be unreliable");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jewelbench_mesh::{IndexedMesh, stl};

    #[test]
    fn test_analyze_cube_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cube.stl");
        std::fs::write(&file, stl::encode_binary(&IndexedMesh::cube(10.0))).unwrap();

        let args = AnalyzeArgs {
            file,
            material: "Gold 18K".to_string(),
        };
        execute(&args, "test", OutputFormat::Json).unwrap();
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let args = AnalyzeArgs {
            file: PathBuf::from("/nonexistent/ring.stl"),
            material: "Platinum".to_string(),
        };
        let err = execute(&args, "test", OutputFormat::Table).unwrap_err();
        assert_eq!(err.kind, jewelbench_core::error::ErrorKind::NotFound);
    }
}
