//! Invariant report for a mesh.

/// Counts of invariant violations found by [`Mesh::check_invariants`](crate::Mesh::check_invariants).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Total number of normals (0 when absent).
    pub normal_count: usize,

    /// Triangles with at least one index `>= vertex_count`.
    pub out_of_range_triangles: usize,
    /// Triangles that repeat a vertex index.
    pub degenerate_triangles: usize,
    /// Vertices not referenced by any triangle.
    pub orphan_vertices: usize,
}

impl MeshReport {
    /// Normals are present but not index-aligned with the vertices.
    #[must_use]
    pub const fn normals_mismatch(&self) -> bool {
        self.normal_count != 0 && self.normal_count != self.vertex_count
    }

    /// All structural invariants hold (orphans are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.out_of_range_triangles == 0 && self.degenerate_triangles == 0 && !self.normals_mismatch()
    }

    /// Valid and free of orphan vertices.
    #[must_use]
    pub const fn is_compact(&self) -> bool {
        self.is_valid() && self.orphan_vertices == 0
    }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Mesh: {} verts ({} orphan), {} tris ({} out of range, {} degenerate), {} normals",
            self.vertex_count,
            self.orphan_vertices,
            self.triangle_count,
            self.out_of_range_triangles,
            self.degenerate_triangles,
            self.normal_count
        )
    }
}
