//! Edge adjacency for the watertight check.

use hashbrown::HashMap;

/// Maps every undirected edge to the number of faces that use it.
///
/// A closed 2-manifold surface uses every edge exactly twice. Edges used
/// once are boundary (hole) edges; edges used three or more times are
/// non-manifold.
#[derive(Debug, Clone, Default)]
pub struct MeshAdjacency {
    /// Edge `(v0, v1)` with `v0 < v1` to adjacent face count.
    edge_faces: HashMap<(u32, u32), u32>,
}

impl MeshAdjacency {
    /// Build adjacency information from a list of faces.
    ///
    /// # Example
    ///
    /// ```
    /// use jewelbench_mesh::MeshAdjacency;
    ///
    /// let adj = MeshAdjacency::build(&[[0, 1, 2], [1, 3, 2]]);
    /// assert_eq!(adj.edge_count(), 5);
    /// assert_eq!(adj.boundary_edge_count(), 4);
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edge_faces: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3 / 2);

        for &[a, b, c] in faces {
            for edge in [normalize_edge(a, b), normalize_edge(b, c), normalize_edge(c, a)] {
                *edge_faces.entry(edge).or_default() += 1;
            }
        }

        Self { edge_faces }
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    /// Edges with exactly one adjacent face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|&&n| n == 1).count()
    }

    /// Edges with more than two adjacent faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|&&n| n > 2).count()
    }

    /// Every edge is shared by exactly two faces.
    ///
    /// An empty mesh is not watertight.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        !self.edge_faces.is_empty() && self.edge_faces.values().all(|&n| n == 2)
    }
}

#[inline]
fn normalize_edge(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}
