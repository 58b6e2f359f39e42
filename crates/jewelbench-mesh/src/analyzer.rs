//! The mesh-analysis capability consumed by the valuation pipeline.

use std::fmt::Debug;
use std::path::Path;

use crate::adjacency::MeshAdjacency;
use crate::error::MeshResult;
use crate::mesh::IndexedMesh;
use crate::stl;

/// Loads a mesh and reports its solid properties.
///
/// Implementations are synchronous and CPU-bound. Callers on an async
/// runtime should run them on a blocking thread.
pub trait MeshAnalyzer: Send + Sync + Debug {
    /// Engine name for logs and CAD metadata.
    fn name(&self) -> &str;

    /// Parse a mesh from raw file bytes.
    fn load(&self, bytes: &[u8]) -> MeshResult<IndexedMesh>;

    /// Enclosed volume in cubic millimeters.
    fn volume(&self, mesh: &IndexedMesh) -> f64;

    /// Surface area in square millimeters.
    fn area(&self, mesh: &IndexedMesh) -> f64;

    /// Whether the mesh is a closed surface enclosing a solid.
    fn is_manifold(&self, mesh: &IndexedMesh) -> bool;

    /// Read and parse a mesh file.
    fn load_file(&self, path: &Path) -> MeshResult<IndexedMesh> {
        let bytes = std::fs::read(path)?;
        self.load(&bytes)
    }
}

/// Enclosed volume below this fraction of `area * bounding diagonal`
/// counts as no volume at all.
const DEGENERATE_VOLUME_RATIO: f64 = 1e-9;

/// Native STL analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlMeshAnalyzer;

impl StlMeshAnalyzer {
    /// Create a new analyzer.
    pub const fn new() -> Self {
        Self
    }
}

impl MeshAnalyzer for StlMeshAnalyzer {
    fn name(&self) -> &str {
        "O.R.I.O.N."
    }

    fn load(&self, bytes: &[u8]) -> MeshResult<IndexedMesh> {
        stl::decode(bytes)
    }

    fn volume(&self, mesh: &IndexedMesh) -> f64 {
        mesh.volume()
    }

    fn area(&self, mesh: &IndexedMesh) -> f64 {
        mesh.surface_area()
    }

    fn is_manifold(&self, mesh: &IndexedMesh) -> bool {
        let adjacency = MeshAdjacency::build(&mesh.faces);
        if !adjacency.is_watertight() {
            tracing::debug!(
                boundary_edges = adjacency.boundary_edge_count(),
                non_manifold_edges = adjacency.non_manifold_edge_count(),
                "Mesh is not watertight"
            );
            return false;
        }

        let volume = mesh.volume();
        let threshold = DEGENERATE_VOLUME_RATIO * mesh.surface_area() * mesh.bounding_diagonal();
        if volume <= threshold {
            tracing::debug!(volume, threshold, "Closed mesh encloses no volume");
            return false;
        }
        true
    }
}
