//! Error types for mesh loading.

use thiserror::Error;

use jewelbench_core::error::AppError;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while loading a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Input too short to hold either STL flavour.
    #[error("file too small to be valid STL ({len} bytes)")]
    TooSmall {
        /// Number of bytes received.
        len: usize,
    },

    /// Binary STL ended before all declared triangles were read.
    #[error("truncated binary STL: header declares {declared} triangles, data holds {available}")]
    Truncated {
        /// Triangle count from the header.
        declared: u32,
        /// Complete triangles actually present.
        available: u64,
    },

    /// The STL reader rejected the content.
    #[error("invalid STL: {0}")]
    Parse(#[source] std::io::Error),

    /// A vertex coordinate was NaN or infinite.
    #[error("non-finite vertex coordinate in triangle {triangle}")]
    NonFinite {
        /// Zero-based triangle index.
        triangle: usize,
    },

    /// The file parsed but contains no triangles.
    #[error("mesh contains no triangles")]
    Empty,

    /// Too many distinct vertices for 32-bit indices.
    #[error("mesh exceeds {max} vertices")]
    TooManyVertices {
        /// The index limit.
        max: u64,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MeshError> for AppError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::Io(e) => AppError::from(e),
            other => AppError::engine(other),
        }
    }
}
