//! Error types for mesh repair operations.

use thiserror::Error;

/// Result type for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Errors that can occur during mesh repair.
///
/// Invalid triangles are not errors; the validator drops them. These
/// variants cover input that the compactor cannot safely rewrite.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepairError {
    /// A triangle references a vertex past the end of the vertex array.
    #[error(
        "triangle {triangle} references vertex {index} (mesh has {vertex_count} vertices)"
    )]
    DataInconsistency {
        /// Position of the offending triangle.
        triangle: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Normals are present but not index-aligned with the vertices.
    #[error("mesh has {normal_count} normals for {vertex_count} vertices")]
    NormalsMismatch {
        /// Number of normals.
        normal_count: usize,
        /// Number of vertices.
        vertex_count: usize,
    },
}
