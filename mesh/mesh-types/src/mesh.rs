//! Indexed triangle mesh with optional per-vertex normals.

use crate::{Aabb, MeshReport};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// This is the value every preparation stage operates on. It is a plain
/// aggregate: stages take `&mut Mesh`, mutate it in place, and keep no
/// reference to it after returning.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Point3<f64>>` - vertex positions; the index is the vertex identity
/// - `triangles`: `Vec<[u32; 3]>` - triangles as vertex indices
/// - `normals`: `Vec<Vector3<f64>>` - per-vertex normals, empty when absent
///
/// # Invariants
///
/// After every successful stage:
/// - every triangle index is `< vertices.len()`
/// - no triangle repeats an index
/// - `normals` is empty or exactly as long as `vertices`
///
/// [`Mesh::check_invariants`] reports violations without mutating anything.
///
/// # Example
///
/// ```
/// use mesh_types::{Mesh, Point3};
///
/// let mut mesh = Mesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.triangles.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!(!mesh.has_normals());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangles as indices into the vertex array.
    ///
    /// Index order within a triangle is the winding; triangle order carries
    /// no meaning.
    pub triangles: Vec<[u32; 3]>,

    /// Per-vertex normals, index-aligned with `vertices`. Empty when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub normals: Vec<Vector3<f64>>,
}

impl Mesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            normals: Vec::new(),
        }
    }

    /// Create a mesh from vertices and triangles, without normals.
    ///
    /// No validation is performed; raw loader output is expected to contain
    /// bad triangles.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Mesh, Point3};
    ///
    /// let mesh = Mesh::from_parts(
    ///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
    ///     vec![[0, 1, 7]],
    /// );
    /// assert!(!mesh.check_invariants().is_valid());
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
            normals: Vec::new(),
        }
    }

    /// Attach per-vertex normals.
    #[must_use]
    pub fn with_normals(mut self, normals: Vec<Vector3<f64>>) -> Self {
        self.normals = normals;
        self
    }

    /// Create a mesh from flat coordinate and index arrays.
    ///
    /// * `positions` - `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `indices` - `[a0, b0, c0, a1, b1, c1, ...]`
    ///
    /// Returns an empty mesh if either length is not a multiple of 3.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Mesh;
    ///
    /// let mesh = Mesh::from_raw(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();

        let triangles = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Self::from_parts(vertices, triangles)
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// A mesh is empty when it has no vertices or no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Whether per-vertex normals are present.
    #[inline]
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Axis-aligned bounding box of all vertices.
    ///
    /// Returns an empty AABB if the mesh has no vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// Arithmetic mean of all vertex positions, `None` for no vertices.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Precision loss: vertex counts beyond 2^52 are unsupported
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Some(Point3::from(sum / self.vertices.len() as f64))
    }

    /// Mark every vertex referenced by at least one triangle.
    ///
    /// Indices past the end of the vertex array are ignored.
    #[must_use]
    pub fn referenced_vertices(&self) -> Vec<bool> {
        let mut referenced = vec![false; self.vertices.len()];
        for tri in &self.triangles {
            for &idx in tri {
                if let Some(slot) = referenced.get_mut(idx as usize) {
                    *slot = true;
                }
            }
        }
        referenced
    }

    /// Report invariant violations without modifying the mesh.
    #[must_use]
    pub fn check_invariants(&self) -> MeshReport {
        let vertex_count = self.vertices.len();
        let mut report = MeshReport {
            vertex_count,
            triangle_count: self.triangles.len(),
            normal_count: self.normals.len(),
            ..MeshReport::default()
        };

        for &[a, b, c] in &self.triangles {
            if [a, b, c].iter().any(|&i| i as usize >= vertex_count) {
                report.out_of_range_triangles += 1;
            }
            if a == b || a == c || b == c {
                report.degenerate_triangles += 1;
            }
        }

        report.orphan_vertices = self
            .referenced_vertices()
            .iter()
            .filter(|&&used| !used)
            .count();
        report
    }

    /// Translate every vertex by `offset`. Normals are directions and are
    /// left untouched.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Scale every vertex uniformly about the origin.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.vertices {
            v.coords *= factor;
        }
    }

    /// Rescale every normal to unit length.
    ///
    /// Zero-length normals are left as they are. Returns how many normals
    /// could not be normalized.
    pub fn normalize_normals(&mut self) -> usize {
        let mut skipped = 0;
        for n in &mut self.normals {
            if n.try_normalize_mut(f64::EPSILON).is_none() {
                skipped += 1;
            }
        }
        skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario_mesh() -> Mesh {
        Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(5.0, 5.0, 5.0),
            ],
            vec![[0, 1, 2], [0, 1, 3]],
        )
    }

    #[test]
    fn mesh_is_empty() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());

        let mut mesh2 = Mesh::new();
        mesh2.vertices.push(Point3::origin());
        assert!(mesh2.is_empty()); // no triangles

        mesh2.triangles.push([0, 0, 0]);
        assert!(!mesh2.is_empty());
    }

    #[test]
    fn from_raw_rejects_ragged_input() {
        let mesh = Mesh::from_raw(&[0.0, 1.0], &[0, 1, 2]);
        assert!(mesh.vertices.is_empty());
        assert!(mesh.triangles.is_empty());
    }

    #[test]
    fn centroid_is_mean() {
        let c = scenario_mesh().centroid().unwrap_or_else(Point3::origin);
        assert_relative_eq!(c.x, 1.5);
        assert_relative_eq!(c.y, 1.5);
        assert_relative_eq!(c.z, 1.25);
        assert!(Mesh::new().centroid().is_none());
    }

    #[test]
    fn referenced_ignores_out_of_range() {
        let mut mesh = scenario_mesh();
        mesh.vertices.push(Point3::new(9.0, 9.0, 9.0));
        mesh.triangles.push([0, 1, 42]);

        let referenced = mesh.referenced_vertices();
        assert_eq!(referenced, vec![true, true, true, true, false]);
    }

    #[test]
    fn invariants_on_clean_mesh() {
        let report = scenario_mesh().check_invariants();
        assert!(report.is_valid());
        assert!(report.is_compact());
    }

    #[test]
    fn invariants_flag_each_violation() {
        let mut mesh = scenario_mesh();
        mesh.vertices.push(Point3::new(9.0, 9.0, 9.0)); // orphan
        mesh.triangles.push([0, 0, 1]); // degenerate
        mesh.triangles.push([0, 1, 99]); // out of range
        mesh.normals = vec![Vector3::z(); 2]; // wrong length

        let report = mesh.check_invariants();
        assert_eq!(report.degenerate_triangles, 1);
        assert_eq!(report.out_of_range_triangles, 1);
        assert_eq!(report.orphan_vertices, 1);
        assert!(report.normals_mismatch());
        assert!(!report.is_valid());
    }

    #[test]
    fn translate_leaves_normals() {
        let mut mesh = scenario_mesh().with_normals(vec![Vector3::z(); 4]);
        mesh.translate(Vector3::new(1.0, 2.0, 3.0));

        assert_eq!(mesh.vertices[0], Point3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.normals[0], Vector3::z());
    }

    #[test]
    fn scale_about_origin() {
        let mut mesh = scenario_mesh();
        mesh.scale(2.0);
        assert_eq!(mesh.vertices[3], Point3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn normalize_normals_skips_zero() {
        let mut mesh = scenario_mesh().with_normals(vec![
            Vector3::new(0.0, 0.0, 3.0),
            Vector3::zeros(),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::x(),
        ]);

        let skipped = mesh.normalize_normals();
        assert_eq!(skipped, 1);
        assert_relative_eq!(mesh.normals[0].norm(), 1.0);
        assert_relative_eq!(mesh.normals[2].norm(), 1.0, epsilon = 1e-12);
        assert_eq!(mesh.normals[1], Vector3::zeros());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_keeps_normals() {
        let mesh = scenario_mesh().with_normals(vec![Vector3::z(); 4]);
        let json = serde_json::to_string(&mesh).unwrap();
        let back: Mesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_normals_deserialize_as_empty() {
        let json = r#"{"vertices":[[0.0,0.0,0.0],[1.0,0.0,0.0],[0.0,1.0,0.0]],"triangles":[[0,1,2]]}"#;
        let mesh: Mesh = serde_json::from_str(json).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
        assert!(!mesh.has_normals());
        assert!(mesh.check_invariants().is_valid());
    }
}
