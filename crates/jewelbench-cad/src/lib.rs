//! # jewelbench-cad
//!
//! Layered CAD export for jewelry meshes.
//!
//! A [`CadDocument`] carries the three fixed jewelry layers (Metal, Stones,
//! Prongs) and mesh objects tagged with metadata. [`codec`] reads and writes
//! it as a 3MF package, and [`CadExporter`] turns a loaded mesh into an
//! [`ExportArtifact`] on disk.

pub mod codec;
pub mod document;
pub mod error;
pub mod export;

pub use document::{CadDocument, Color, Layer, MeshObject};
pub use error::{CadError, CadResult};
pub use export::{
    CadExporter, ENGINE_ID, ExportArtifact, FILE_EXTENSION, MEDIA_TYPE, build_document,
    download_name,
};
