//! Material valuation: price tables, arithmetic, display formatting, and
//! the upload-to-report pipeline.

pub mod display;
pub mod model;
pub mod pipeline;
pub mod tables;

pub use display::ValuationDisplay;
pub use model::{Analysis, MeshMetrics, Valuation, ValuationReport, quote};
pub use pipeline::ValuationPipeline;
pub use tables::{MaterialInfo, density, material_catalog, spot_price};
