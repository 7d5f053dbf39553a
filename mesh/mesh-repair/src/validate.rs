//! Triangle validation.
//!
//! Drops triangles that reference vertices outside the mesh or repeat a
//! vertex index. Dropping is routine for scanned geometry, so nothing here
//! returns an error.

use mesh_types::Mesh;
use tracing::debug;

/// Check a single triangle against a vertex count.
///
/// A triangle is valid when all three indices are `< num_vertices` and
/// pairwise distinct.
///
/// # Example
///
/// ```
/// use mesh_repair::is_valid_triangle;
///
/// assert!(is_valid_triangle([0, 1, 2], 3));
/// assert!(!is_valid_triangle([0, 1, 3], 3)); // out of range
/// assert!(!is_valid_triangle([0, 0, 1], 3)); // repeated index
/// ```
#[inline]
#[must_use]
pub fn is_valid_triangle(tri: [u32; 3], num_vertices: usize) -> bool {
    let [a, b, c] = tri;
    let in_range = |i: u32| (i as usize) < num_vertices;
    in_range(a) && in_range(b) && in_range(c) && a != b && a != c && b != c
}

/// Return the valid triangles, in their original order.
///
/// # Example
///
/// ```
/// use mesh_repair::validate_triangles;
///
/// let kept = validate_triangles(&[[0, 1, 2], [0, 0, 1], [0, 1, 3]], 4);
/// assert_eq!(kept, vec![[0, 1, 2], [0, 1, 3]]);
/// ```
#[must_use]
pub fn validate_triangles(triangles: &[[u32; 3]], num_vertices: usize) -> Vec<[u32; 3]> {
    triangles
        .iter()
        .copied()
        .filter(|&tri| is_valid_triangle(tri, num_vertices))
        .collect()
}

/// Drop invalid triangles from the mesh in place.
///
/// Vertices and normals are not touched. Returns the number of triangles
/// removed.
///
/// # Example
///
/// ```
/// use mesh_types::{Mesh, Point3};
/// use mesh_repair::remove_invalid_triangles;
///
/// let mut mesh = Mesh::from_parts(
///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![[0, 1, 2], [2, 2, 0], [0, 1, 5]],
/// );
///
/// let removed = remove_invalid_triangles(&mut mesh);
/// assert_eq!(removed, 2);
/// assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
/// ```
pub fn remove_invalid_triangles(mesh: &mut Mesh) -> usize {
    let original_count = mesh.triangles.len();
    let num_vertices = mesh.vertices.len();

    mesh.triangles.retain(|&tri| is_valid_triangle(tri, num_vertices));

    let removed = original_count - mesh.triangles.len();
    debug!(
        removed,
        kept = mesh.triangles.len(),
        "Removed invalid triangles"
    );
    removed
}
