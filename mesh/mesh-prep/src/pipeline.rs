//! The cleaning pipeline and the independent rescale step.

use mesh_repair::{CompactSummary, compact_vertices, remove_invalid_triangles};
use mesh_transform::{
    CanonicalPose, RescaleTarget, ScalePolicy, canonicalize_pose, reference_length,
};
use mesh_types::{Aabb, Mesh};
use tracing::info;

use crate::error::{PrepError, PrepResult, Stage};
use crate::params::PrepParams;

/// Outcome of [`clean`].
#[derive(Debug, Clone)]
pub struct CleanReport {
    /// Number of vertices before cleaning.
    pub initial_vertices: usize,
    /// Number of triangles before cleaning.
    pub initial_triangles: usize,
    /// Number of triangles dropped by validation.
    pub triangles_dropped: usize,
    /// Outcome of vertex compaction.
    pub compact: CompactSummary,
    /// Canonical frame the mesh was moved into.
    pub pose: CanonicalPose,
}

impl CleanReport {
    /// Number of vertices after cleaning.
    #[must_use]
    pub const fn final_vertices(&self) -> usize {
        self.compact.final_vertices
    }

    /// Number of triangles after cleaning.
    #[must_use]
    pub const fn final_triangles(&self) -> usize {
        self.initial_triangles - self.triangles_dropped
    }

    /// Check if validation or compaction removed anything.
    #[must_use]
    pub const fn had_removals(&self) -> bool {
        self.triangles_dropped > 0 || self.compact.had_changes()
    }
}

impl std::fmt::Display for CleanReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Clean: {} verts ({} unreferenced), {} tris ({} invalid)",
            self.final_vertices(),
            self.compact.removed,
            self.final_triangles(),
            self.triangles_dropped
        )?;
        if let Some(axis) = self.pose.reflection_corrected {
            write!(f, ", reflection corrected on axis {axis}")?;
        }
        Ok(())
    }
}

/// Outcome of [`rescale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescaleReport {
    /// Policy the target referred to.
    pub policy: ScalePolicy,
    /// Requested target length (or factor, for [`ScalePolicy::Absolute`]).
    pub target: f64,
    /// Reference length measured before scaling.
    pub reference: f64,
    /// Factor applied to every coordinate.
    pub factor: f64,
    /// Bounds after scaling.
    pub bounds: Aabb,
}

impl std::fmt::Display for RescaleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rescale: {} {} -> {} (factor {})",
            self.policy, self.reference, self.target, self.factor
        )
    }
}

/// Run validation, compaction and pose canonicalization in order.
///
/// Stops at the first failing stage. The mesh is then left as the last
/// successful stage produced it; a failing stage itself never mutates.
///
/// # Errors
///
/// Validation itself never fails; invalid triangles are dropped.
///
/// - [`Stage::Compact`]: normals are present but their count differs from
///   the vertex count, or a triangle index is out of range
/// - [`Stage::Canonicalize`]: the surviving vertices do not span three
///   dimensions (including when none survive)
///
/// # Example
///
/// ```
/// use mesh_prep::{PrepParams, clean};
/// use mesh_types::{Mesh, Point3};
///
/// let mut mesh = Mesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(5.0, 5.0, 5.0),
///     ],
///     vec![[0, 1, 2], [0, 1, 3], [0, 0, 1]],
/// );
///
/// let report = clean(&mut mesh, &PrepParams::default()).unwrap();
/// assert_eq!(report.triangles_dropped, 1);
/// assert_eq!(mesh.vertex_count(), 4);
/// assert!(mesh.bounds().center().coords.norm() < 1e-9);
/// ```
pub fn clean(mesh: &mut Mesh, params: &PrepParams) -> PrepResult<CleanReport> {
    let initial_vertices = mesh.vertex_count();
    let initial_triangles = mesh.triangle_count();

    let triangles_dropped = remove_invalid_triangles(mesh);

    let compact = compact_vertices(mesh).map_err(|e| PrepError::new(Stage::Compact, e))?;

    let pose =
        canonicalize_pose(mesh, &params.pose).map_err(|e| PrepError::new(Stage::Canonicalize, e))?;

    let report = CleanReport {
        initial_vertices,
        initial_triangles,
        triangles_dropped,
        compact,
        pose,
    };

    info!(
        vertices = report.final_vertices(),
        triangles = report.final_triangles(),
        triangles_dropped,
        vertices_removed = report.compact.removed,
        reflection_corrected = ?report.pose.reflection_corrected,
        "Cleaned mesh"
    );

    Ok(report)
}

/// Uniformly scale the mesh so the policy's reference length equals the target.
///
/// # Errors
///
/// Fails at [`Stage::Rescale`] if the target is not finite and positive, the
/// reference length is zero or not finite (an empty mesh has a zero reference
/// length), or the normals don't match the vertices. The mesh is unchanged.
///
/// # Example
///
/// ```
/// use mesh_prep::rescale;
/// use mesh_transform::{RescaleTarget, ScalePolicy};
/// use mesh_types::{Mesh, Point3};
///
/// let mut mesh = Mesh::from_parts(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 2.0, 1.0)],
///     vec![],
/// );
///
/// let report = rescale(&mut mesh, &RescaleTarget::new(2.0, ScalePolicy::Max)).unwrap();
/// assert_eq!(report.factor, 0.5);
/// assert_eq!(mesh.bounds().max_extent(), 2.0);
/// ```
pub fn rescale(mesh: &mut Mesh, target: &RescaleTarget) -> PrepResult<RescaleReport> {
    let reference = reference_length(&mesh.bounds().size(), target.policy);
    let factor =
        mesh_transform::rescale(mesh, target).map_err(|e| PrepError::new(Stage::Rescale, e))?;

    let report = RescaleReport {
        policy: target.policy,
        target: target.scale,
        reference,
        factor,
        bounds: mesh.bounds(),
    };
    info!(
        policy = %report.policy,
        reference,
        factor,
        max_extent = report.bounds.max_extent(),
        "Rescaled mesh"
    );
    Ok(report)
}
