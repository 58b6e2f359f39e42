//! Indexed triangle mesh.

use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by index. Coordinates are unit-agnostic `f64`; jewelry files
/// are authored in millimeters, so volumes come out in mm³.
///
/// # Example
///
/// ```
/// use jewelbench_mesh::{IndexedMesh, Point3};
///
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

/// Axis-aligned size of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extents {
    /// Size along X.
    pub x: f64,
    /// Size along Y.
    pub y: f64,
    /// Size along Z.
    pub z: f64,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces.
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Axis-aligned cube from the origin to `(size, size, size)`.
    ///
    /// 8 vertices and 12 outward-facing triangles.
    #[must_use]
    pub fn cube(size: f64) -> Self {
        let s = size;
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(s, 0.0, 0.0),
            Point3::new(s, s, 0.0),
            Point3::new(0.0, s, 0.0),
            Point3::new(0.0, 0.0, s),
            Point3::new(s, 0.0, s),
            Point3::new(s, s, s),
            Point3::new(0.0, s, s),
        ];
        let faces = vec![
            // bottom (-Z)
            [0, 2, 1],
            [0, 3, 2],
            // top (+Z)
            [4, 5, 6],
            [4, 6, 7],
            // front (-Y)
            [0, 1, 5],
            [0, 5, 4],
            // back (+Y)
            [3, 7, 6],
            [3, 6, 2],
            // left (-X)
            [0, 4, 7],
            [0, 7, 3],
            // right (+X)
            [1, 2, 6],
            [1, 6, 5],
        ];
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangular faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate faces with resolved corner positions.
    ///
    /// Faces referencing out-of-range vertices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.faces.iter().filter_map(|&[a, b, c]| {
            Some([
                *self.vertices.get(a as usize)?,
                *self.vertices.get(b as usize)?,
                *self.vertices.get(c as usize)?,
            ])
        })
    }

    /// Mean of the vertex positions, or `None` for a mesh with no vertices.
    #[must_use]
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        #[allow(clippy::cast_precision_loss)]
        let n = self.vertices.len() as f64;
        Some(Point3::from(sum / n))
    }

    /// Compute the signed volume of the mesh.
    ///
    /// Sum of signed tetrahedra formed by each face and the vertex
    /// centroid (divergence theorem). Positive for a closed mesh with
    /// outward normals, negative when inside-out. Measuring from the
    /// centroid keeps the result independent of where the part sits, so
    /// a flat sheet reports zero wherever it is placed.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let Some(center) = self.centroid() else {
            return 0.0;
        };
        let volume: f64 = self
            .triangles()
            .map(|[v0, v1, v2]| {
                let (a, b, c) = (v0 - center, v1 - center, v2 - center);
                let cross = Vector3::new(
                    b.y.mul_add(c.z, -(b.z * c.y)),
                    b.z.mul_add(c.x, -(b.x * c.z)),
                    b.x.mul_add(c.y, -(b.y * c.x)),
                );
                a.z.mul_add(cross.z, a.x.mul_add(cross.x, a.y * cross.y))
            })
            .sum();

        volume / 6.0
    }

    /// Absolute enclosed volume.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles()
            .map(|[v0, v1, v2]| (v1 - v0).cross(&(v2 - v0)).norm() * 0.5)
            .sum()
    }

    /// Bounding-box size, or `None` for a mesh with no vertices.
    #[must_use]
    pub fn extents(&self) -> Option<Extents> {
        let first = self.vertices.first()?;
        let (min, max) = self.vertices.iter().fold((*first, *first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        });
        let size = max - min;
        Some(Extents {
            x: size.x,
            y: size.y,
            z: size.z,
        })
    }

    /// Length of the bounding-box diagonal, zero for a mesh with no vertices.
    #[must_use]
    pub fn bounding_diagonal(&self) -> f64 {
        self.extents()
            .map_or(0.0, |e| Vector3::new(e.x, e.y, e.z).norm())
    }
}
