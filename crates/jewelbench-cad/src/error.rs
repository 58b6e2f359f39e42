//! Error type for CAD document packaging, reading, and export.

use std::path::PathBuf;

use jewelbench_core::error::AppError;
use thiserror::Error;

/// Result type for CAD operations.
pub type CadResult<T> = Result<T, CadError>;

/// Errors raised while building, packaging, reading, or writing a CAD document.
#[derive(Debug, Error)]
pub enum CadError {
    // --- Document errors ---
    /// A mesh object references a layer the document does not have.
    #[error("layer {layer} does not exist (document has {layers} layers)")]
    LayerOutOfRange {
        /// Requested layer index.
        layer: u32,
        /// Number of layers in the document.
        layers: usize,
    },

    /// A face references a vertex past the end of the vertex list.
    #[error("face {face} references vertex {index} but the object has {vertices} vertices")]
    FaceIndexOutOfRange {
        /// Zero-based face index.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Vertex count of the object.
        vertices: usize,
    },

    // --- Decoding errors ---
    /// The ZIP package could not be read or written.
    #[error("3MF package error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A required package part is absent.
    #[error("3MF package has no {0} part")]
    MissingPart(&'static str),

    /// The model part inflates past the reader's limit.
    #[error("3MF model part exceeds {limit} bytes")]
    ModelTooLarge {
        /// Size limit in bytes.
        limit: u64,
    },

    /// The model part is not well-formed XML.
    #[error("malformed 3MF model: {0}")]
    Xml(String),

    /// An element lacks an attribute the document needs.
    #[error("<{element}> is missing the {attribute} attribute")]
    MissingAttribute {
        /// Element local name.
        element: String,
        /// Attribute name.
        attribute: &'static str,
    },

    /// An attribute value could not be parsed.
    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        /// Element local name.
        element: String,
        /// Attribute name.
        attribute: &'static str,
        /// The raw value.
        value: String,
    },

    // --- Write errors ---
    /// The export directory is unusable.
    #[error("export directory {path} is not available: {source}")]
    OutputDir {
        /// The configured directory.
        path: PathBuf,
        /// Underlying cause.
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CadError {
    /// Create an `Xml` error from any XML reader or writer failure.
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<CadError> for AppError {
    fn from(err: CadError) -> Self {
        AppError::engine(err)
    }
}
