//! Pose canonicalization.
//!
//! Moves a mesh into a repeatable object-centered frame:
//!
//! 1. Subtract the vertex centroid.
//! 2. Extract principal axes (PCA), largest variance first.
//! 3. Orient each axis toward the side holding the majority of vertices.
//! 4. Rotate so the axes land on +Z, +Y, +X (largest to smallest variance).
//! 5. Translate so the bounding box midpoint is at the origin.
//!
//! Normals are rotated but never translated.

use mesh_types::{Aabb, Mesh};
use nalgebra::{Matrix3, Point3, Rotation3, Vector3};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{TransformError, TransformResult, check_normals};
use crate::pca::pca_axes;

/// Tolerance used to verify that a solved matrix is a proper rotation.
const ROTATION_TOLERANCE: f64 = 1e-6;

/// Parameters for [`canonicalize_pose`].
///
/// # Example
///
/// ```
/// use mesh_transform::PoseParams;
///
/// let params = PoseParams::default()
///     .with_rank_tolerance(1e-8)
///     .with_renormalize_normals(true);
/// assert!(params.renormalize_normals);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoseParams {
    /// Smallest ratio of an eigenvalue to the largest eigenvalue for that
    /// principal direction to count toward the rank.
    ///
    /// Clouds with rank below 3 are rejected as degenerate.
    /// Default: `1e-10`
    pub rank_tolerance: f64,

    /// Rescale normals to unit length after rotating them.
    ///
    /// Default: `false`
    pub renormalize_normals: bool,
}

impl Default for PoseParams {
    fn default() -> Self {
        Self {
            rank_tolerance: 1e-10,
            renormalize_normals: false,
        }
    }
}

impl PoseParams {
    /// Set the relative eigenvalue threshold for the rank check.
    #[must_use]
    pub fn with_rank_tolerance(mut self, tolerance: f64) -> Self {
        self.rank_tolerance = tolerance;
        self
    }

    /// Set whether normals are renormalized after rotation.
    #[must_use]
    pub fn with_renormalize_normals(mut self, renormalize: bool) -> Self {
        self.renormalize_normals = renormalize;
        self
    }
}

/// Vertex counts on either side of the origin along one principal axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignVote {
    /// Vertices with projection `>= 0` onto the raw eigenvector.
    pub same: usize,
    /// Vertices with projection `< 0` onto the raw eigenvector.
    pub opposite: usize,
}

impl SignVote {
    /// Count the projections of centered points onto `axis`.
    #[must_use]
    pub fn count(centered: &[Vector3<f64>], axis: &Vector3<f64>) -> Self {
        let same = centered.iter().filter(|c| c.dot(axis) >= 0.0).count();
        Self {
            same,
            opposite: centered.len() - same,
        }
    }

    /// The raw eigenvector keeps its sign only on a strict majority; a tie
    /// flips it.
    #[must_use]
    pub const fn keeps_sign(&self) -> bool {
        self.same > self.opposite
    }

    /// Absolute difference between the two counts.
    #[must_use]
    pub const fn margin(&self) -> usize {
        self.same.abs_diff(self.opposite)
    }
}

/// The canonical frame chosen for a mesh, and how it was reached.
#[derive(Debug, Clone)]
pub struct CanonicalPose {
    /// Vertex centroid in the input frame.
    pub centroid: Point3<f64>,
    /// Sign-corrected principal axes in the input frame, largest variance first.
    pub axes: [Vector3<f64>; 3],
    /// Variances along `axes`, descending.
    pub eigenvalues: [f64; 3],
    /// Rotation taking `axes` to +Z, +Y, +X.
    pub rotation: Rotation3<f64>,
    /// Bounding-box recentering offset applied after the rotation.
    pub translation: Vector3<f64>,
    /// Majority votes on the raw eigenvectors.
    pub votes: [SignVote; 3],
    /// Axis whose sign was flipped a second time because the majority
    /// orientation formed a reflection instead of a rotation.
    pub reflection_corrected: Option<usize>,
}

impl CanonicalPose {
    /// Map a point from the input frame into the canonical frame.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * (point - self.centroid) + self.translation)
    }

    /// Map a direction from the input frame into the canonical frame.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * vector
    }

    /// Map a point from the canonical frame back into the input frame.
    #[must_use]
    pub fn inverse_transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.centroid + self.rotation.inverse() * (point.coords - self.translation)
    }
}

/// Rows `[+Z, +Y, +X]`: target directions for axes of decreasing variance.
#[must_use]
pub fn canonical_targets() -> Matrix3<f64> {
    #[rustfmt::skip]
    let targets = Matrix3::new(
        0.0, 0.0, 1.0,
        0.0, 1.0, 0.0,
        1.0, 0.0, 0.0,
    );
    targets
}

/// Solve `axes · Rᵗ = targets` for the matrix `R` taking each axis to its
/// canonical target.
///
/// The result is a rotation only if the axes have the right handedness;
/// check it with [`is_proper_rotation`].
///
/// # Errors
///
/// Returns [`TransformError::NotInvertible`] if the axes are linearly dependent.
pub fn rotation_to_canonical(axes: &[Vector3<f64>; 3]) -> TransformResult<Matrix3<f64>> {
    let axis_rows = Matrix3::from_rows(&[
        axes[0].transpose(),
        axes[1].transpose(),
        axes[2].transpose(),
    ]);
    let solved = axis_rows
        .lu()
        .solve(&canonical_targets())
        .ok_or(TransformError::NotInvertible)?;
    Ok(solved.transpose())
}

/// Check `RᵗR ≈ I` and `det(R) ≈ +1`.
#[must_use]
pub fn is_proper_rotation(matrix: &Matrix3<f64>, tolerance: f64) -> bool {
    let orthogonality = (matrix.transpose() * matrix - Matrix3::identity()).norm();
    orthogonality < tolerance && (matrix.determinant() - 1.0).abs() < tolerance
}

/// Move the mesh into its canonical frame.
///
/// Nothing is modified unless the whole computation succeeds.
///
/// # Sign convention
///
/// Each raw eigenvector keeps its sign only if strictly more vertices project
/// onto it with a non-negative value than with a negative one. When the
/// three majority-oriented axes have the wrong handedness for the +Z, +Y, +X
/// target (`det(R) = -1`), the axis with the weakest majority (the
/// least-variance axis on a tie) is flipped again so the result is a
/// rotation; this is recorded in
/// [`CanonicalPose::reflection_corrected`].
///
/// # Errors
///
/// - [`TransformError::NormalsMismatch`] if normals are present but not one
///   per vertex
/// - [`TransformError::DegenerateGeometry`] if the vertices are coincident,
///   collinear, coplanar, or fewer than 3 (including none)
/// - [`TransformError::NotInvertible`] if the rotation solve fails numerically
///
/// # Example
///
/// ```
/// use mesh_transform::{PoseParams, canonicalize_pose};
/// use mesh_types::{Mesh, Point3};
///
/// // A 1 x 2 x 4 box, longest along X
/// let mut mesh = Mesh::new();
/// for &x in &[0.0, 4.0] {
///     for &y in &[0.0, 1.0] {
///         for &z in &[0.0, 2.0] {
///             mesh.vertices.push(Point3::new(x, y, z));
///         }
///     }
/// }
/// mesh.triangles.push([0, 1, 2]);
///
/// canonicalize_pose(&mut mesh, &PoseParams::default()).unwrap();
///
/// let size = mesh.bounds().size();
/// assert!((size.z - 4.0).abs() < 1e-9); // longest axis is now Z
/// assert!((size.x - 1.0).abs() < 1e-9); // shortest axis is now X
/// ```
pub fn canonicalize_pose(mesh: &mut Mesh, params: &PoseParams) -> TransformResult<CanonicalPose> {
    check_normals(mesh)?;

    let vertex_count = mesh.vertices.len();
    let pca = pca_axes(mesh).ok_or(TransformError::DegenerateGeometry {
        rank: vertex_count.saturating_sub(1),
        vertex_count,
    })?;
    let rank = pca.rank(params.rank_tolerance);
    if rank < 3 {
        return Err(TransformError::DegenerateGeometry { rank, vertex_count });
    }

    let centered: Vec<Vector3<f64>> = mesh.vertices.iter().map(|v| v - pca.centroid).collect();

    let votes = pca.axes.map(|axis| SignVote::count(&centered, &axis));
    let mut axes = pca.axes;
    for (axis, vote) in axes.iter_mut().zip(&votes) {
        if !vote.keeps_sign() {
            *axis = -*axis;
        }
    }

    let mut matrix = rotation_to_canonical(&axes)?;
    let mut reflection_corrected = None;
    if matrix.determinant() < 0.0 {
        let flip = weakest_vote(&votes);
        axes[flip] = -axes[flip];
        matrix = rotation_to_canonical(&axes)?;
        reflection_corrected = Some(flip);
        warn!(
            axis = flip,
            same = votes[flip].same,
            opposite = votes[flip].opposite,
            "Majority-oriented principal axes form a reflection; flipped one axis"
        );
    }
    if !is_proper_rotation(&matrix, ROTATION_TOLERANCE) {
        return Err(TransformError::NotInvertible);
    }
    let rotation = Rotation3::from_matrix_unchecked(matrix);

    let rotated: Vec<Point3<f64>> = centered.iter().map(|c| Point3::from(rotation * c)).collect();
    let translation = -Aabb::from_points(rotated.iter()).center().coords;

    mesh.vertices = rotated.into_iter().map(|p| p + translation).collect();
    for normal in &mut mesh.normals {
        *normal = rotation * *normal;
    }
    if params.renormalize_normals {
        mesh.normalize_normals();
    }

    debug!(
        vertices = vertex_count,
        eigenvalues = ?pca.eigenvalues,
        reflection_corrected = ?reflection_corrected,
        "Canonicalized pose"
    );

    Ok(CanonicalPose {
        centroid: pca.centroid,
        axes,
        eigenvalues: pca.eigenvalues,
        rotation,
        translation,
        votes,
        reflection_corrected,
    })
}

/// Index of the least decisive vote; ties go to the least-variance axis.
fn weakest_vote(votes: &[SignVote; 3]) -> usize {
    (0..3)
        .min_by_key(|&i| (votes[i].margin(), std::cmp::Reverse(i)))
        .unwrap_or(2)
}
