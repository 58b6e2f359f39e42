//! # jewelbench-mesh
//!
//! Mesh loading and solid-property analysis for jewelry designs.
//!
//! - [`IndexedMesh`] - vertices plus index-triplet faces, in millimeters
//! - [`stl`] - ASCII and binary STL loading through `stl_io`
//! - [`MeshAdjacency`] - edge-to-face map used for the watertight check
//! - [`MeshAnalyzer`] - the narrow capability the valuation pipeline depends on
//!
//! Face winding is **counter-clockwise when viewed from outside**, so a
//! closed, correctly oriented mesh has a positive signed volume.

pub mod adjacency;
pub mod analyzer;
pub mod error;
pub mod mesh;
pub mod stl;

pub use adjacency::MeshAdjacency;
pub use analyzer::{MeshAnalyzer, StlMeshAnalyzer};
pub use error::{MeshError, MeshResult};
pub use mesh::IndexedMesh;

pub use nalgebra::{Point3, Vector3};
