//! Error types for mesh transformation operations.

use thiserror::Error;

use crate::rescale::ScalePolicy;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur during pose canonicalization or rescaling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    /// The vertex cloud does not span three dimensions, so principal axes
    /// are not uniquely defined. An empty mesh has rank 0.
    #[error("degenerate geometry: {vertex_count} vertices span only {rank} of 3 dimensions")]
    DegenerateGeometry {
        /// Number of principal directions with non-negligible variance.
        rank: usize,
        /// Number of vertices analyzed.
        vertex_count: usize,
    },

    /// The axis matrix could not be inverted while solving for the rotation.
    #[error("principal axis matrix is not invertible")]
    NotInvertible,

    /// The reference length for the chosen policy is zero or not finite.
    #[error("cannot rescale: {policy} reference length is zero or not finite")]
    DivideByZero {
        /// Policy that produced the zero reference length.
        policy: ScalePolicy,
    },

    /// Target scale must be finite and strictly positive.
    #[error("invalid target scale {scale}: must be finite and > 0")]
    InvalidScale {
        /// The rejected scale.
        scale: f64,
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

/// Reject normals that are present but not one per vertex.
pub(crate) fn check_normals(mesh: &mesh_types::Mesh) -> TransformResult<()> {
    if mesh.has_normals() && mesh.normals.len() != mesh.vertices.len() {
        return Err(TransformError::NormalsMismatch {
            normal_count: mesh.normals.len(),
            vertex_count: mesh.vertices.len(),
        });
    }
    Ok(())
}
