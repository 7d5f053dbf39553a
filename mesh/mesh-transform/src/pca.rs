//! Principal Component Analysis for mesh vertices.
//!
//! Computes the principal axes of a point cloud from the eigen-decomposition
//! of its covariance matrix.

use mesh_types::Mesh;
use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};

/// Result of PCA computation on a point cloud.
///
/// Contains the principal axes sorted by variance (largest first).
#[derive(Debug, Clone)]
pub struct PcaResult {
    /// The centroid of the point cloud.
    pub centroid: Point3<f64>,
    /// Principal axes (unit eigenvectors), sorted by eigenvalue descending.
    /// `axes[0]` is the direction of maximum variance.
    ///
    /// Eigenvectors carry no inherent sign.
    pub axes: [Vector3<f64>; 3],
    /// Variances along each axis (`axisᵗ C axis`), sorted descending.
    pub eigenvalues: [f64; 3],
}

impl PcaResult {
    /// Get the primary axis (direction of maximum variance).
    #[must_use]
    pub const fn primary_axis(&self) -> Vector3<f64> {
        self.axes[0]
    }

    /// Get the secondary axis (direction of second-most variance).
    #[must_use]
    pub const fn secondary_axis(&self) -> Vector3<f64> {
        self.axes[1]
    }

    /// Get the tertiary axis (direction of minimum variance).
    #[must_use]
    pub const fn tertiary_axis(&self) -> Vector3<f64> {
        self.axes[2]
    }

    /// Number of principal directions whose variance, relative to the
    /// largest, is at least `tolerance`.
    ///
    /// A cloud of coincident points has rank 0, a line rank 1, a plane rank 2.
    #[must_use]
    pub fn rank(&self, tolerance: f64) -> usize {
        let largest = self.eigenvalues[0];
        if !largest.is_finite() || largest <= f64::EPSILON * f64::EPSILON {
            return 0;
        }
        self.eigenvalues
            .iter()
            .filter(|&&ev| ev / largest >= tolerance)
            .count()
    }

    /// Check if the point cloud is approximately flat (one eigenvalue near zero).
    ///
    /// # Arguments
    ///
    /// * `threshold` - Ratio of smallest to largest eigenvalue below which is flat
    #[must_use]
    pub fn is_flat(&self, threshold: f64) -> bool {
        self.rank(threshold) < 3
    }

    /// Check if the point cloud is approximately linear (two eigenvalues near zero).
    ///
    /// # Arguments
    ///
    /// * `threshold` - Ratio threshold for considering eigenvalues as near zero
    #[must_use]
    pub fn is_linear(&self, threshold: f64) -> bool {
        self.rank(threshold) < 2
    }
}

/// Compute PCA on the vertices of a mesh.
///
/// Returns `None` if the mesh has fewer than 3 vertices.
///
/// # Example
///
/// ```
/// use mesh_transform::pca_axes;
/// use mesh_types::{Mesh, Point3};
///
/// let mesh = Mesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(10.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(10.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// let pca = pca_axes(&mesh).unwrap();
/// // Primary axis should be roughly along X (the long direction)
/// assert!(pca.primary_axis().x.abs() > 0.9);
/// ```
#[must_use]
pub fn pca_axes(mesh: &Mesh) -> Option<PcaResult> {
    pca_from_points(&mesh.vertices)
}

/// Compute PCA on a slice of points.
///
/// Returns `None` if there are fewer than 3 points.
#[must_use]
#[allow(clippy::cast_precision_loss)]
// Precision loss: point counts beyond 2^52 are unsupported
pub fn pca_from_points(points: &[Point3<f64>]) -> Option<PcaResult> {
    if points.len() < 3 {
        return None;
    }

    // Compute centroid
    let count = points.len() as f64;
    let centroid = Point3::from(
        points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            / count,
    );

    // Build covariance matrix
    let mut covariance = Matrix3::zeros();
    for p in points {
        let centered = p - centroid;
        covariance += centered * centered.transpose();
    }
    covariance /= count;

    // Eigen decomposition. The reported eigenvalues can be paired with the
    // wrong columns when the covariance is nearly diagonal, so each axis is
    // ranked by its own Rayleigh quotient instead.
    let eigen = SymmetricEigen::new(covariance);
    let columns: [Vector3<f64>; 3] =
        [0, 1, 2].map(|i| eigen.eigenvectors.column(i).normalize());
    let variances = columns.map(|axis| axis.dot(&(covariance * axis)));

    // Sort by variance (descending)
    let mut indices = [0usize, 1, 2];
    indices.sort_by(|&a, &b| variances[b].total_cmp(&variances[a]));

    let axes = indices.map(|i| columns[i]);
    let sorted_eigenvalues = indices.map(|i| variances[i]);

    Some(PcaResult {
        centroid,
        axes,
        eigenvalues: sorted_eigenvalues,
    })
}
