//! # jewelbench-service
//!
//! Business logic for JewelBench. The valuation pipeline stages an upload,
//! loads it through a [`MeshAnalyzer`](jewelbench_mesh::MeshAnalyzer), and
//! prices the metal; the export service reuses the loaded mesh to write a
//! layered CAD file.
//!
//! Services follow constructor injection and are cheap to clone. All work
//! is synchronous; async callers should run it on a blocking thread.

pub mod export;
pub mod upload;
pub mod valuation;

pub use export::{ExportOutcome, ExportService};
pub use upload::{MeshUpload, StagedUpload, UploadStaging};
pub use valuation::{
    Analysis, MaterialInfo, MeshMetrics, Valuation, ValuationDisplay, ValuationPipeline,
    ValuationReport, material_catalog, quote,
};
