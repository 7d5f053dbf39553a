//! Unreferenced vertex removal.
//!
//! Keeps only vertices used by at least one triangle, preserving their
//! relative order, and rewrites triangle indices through a prefix-sum remap.

use mesh_types::Mesh;
use tracing::debug;

use crate::error::{RepairError, RepairResult};

/// Outcome of [`compact_vertices`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactSummary {
    /// Number of vertices before compaction.
    pub initial_vertices: usize,
    /// Number of vertices after compaction.
    pub final_vertices: usize,
    /// Number of unreferenced vertices removed.
    pub removed: usize,
}

impl CompactSummary {
    /// Check if any vertex was removed.
    #[must_use]
    pub const fn had_changes(&self) -> bool {
        self.removed > 0
    }
}

impl std::fmt::Display for CompactSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Compact: {} -> {} verts ({} unreferenced)",
            self.initial_vertices, self.final_vertices, self.removed
        )
    }
}

/// Remove vertices (and their normals) not referenced by any triangle.
///
/// Triangle order and winding are preserved; only index values change.
///
/// # Errors
///
/// The mesh is left unmodified and an error returned if:
/// - a triangle index is out of range for the current vertex count
///   ([`RepairError::DataInconsistency`])
/// - normals are present with a length different from the vertex count
///   ([`RepairError::NormalsMismatch`])
///
/// # Example
///
/// ```
/// use mesh_types::{Mesh, Point3};
/// use mesh_repair::compact_vertices;
///
/// let mut mesh = Mesh::from_parts(
///     vec![
///         Point3::new(100.0, 100.0, 100.0), // unreferenced
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[1, 2, 3]],
/// );
///
/// let summary = compact_vertices(&mut mesh).unwrap();
/// assert_eq!(summary.removed, 1);
/// assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
/// ```
#[allow(clippy::cast_possible_truncation)]
// Truncation: compacted indices never exceed the original u32 indices
pub fn compact_vertices(mesh: &mut Mesh) -> RepairResult<CompactSummary> {
    let vertex_count = mesh.vertices.len();

    if mesh.has_normals() && mesh.normals.len() != vertex_count {
        return Err(RepairError::NormalsMismatch {
            normal_count: mesh.normals.len(),
            vertex_count,
        });
    }

    // Mark referenced vertices, rejecting out-of-range indices before any mutation
    let mut referenced = vec![false; vertex_count];
    for (triangle, tri) in mesh.triangles.iter().enumerate() {
        for &index in tri {
            match referenced.get_mut(index as usize) {
                Some(slot) => *slot = true,
                None => {
                    return Err(RepairError::DataInconsistency {
                        triangle,
                        index,
                        vertex_count,
                    });
                }
            }
        }
    }

    // Prefix-sum remap: new index = referenced count at or before old index, minus one
    let mut remap = vec![0u32; vertex_count];
    let mut next = 0u32;
    for (old, &used) in referenced.iter().enumerate() {
        if used {
            remap[old] = next;
            next += 1;
        }
    }
    let final_vertices = next as usize;

    let summary = CompactSummary {
        initial_vertices: vertex_count,
        final_vertices,
        removed: vertex_count - final_vertices,
    };

    if !summary.had_changes() {
        debug!(vertices = vertex_count, "No unreferenced vertices");
        return Ok(summary);
    }

    mesh.vertices = retain_marked(&mesh.vertices, &referenced);
    if mesh.has_normals() {
        mesh.normals = retain_marked(&mesh.normals, &referenced);
    }

    for tri in &mut mesh.triangles {
        for index in tri.iter_mut() {
            *index = remap[*index as usize];
        }
    }

    debug!(
        removed = summary.removed,
        remaining = summary.final_vertices,
        "Removed unreferenced vertices"
    );
    Ok(summary)
}

fn retain_marked<T: Copy>(items: &[T], marks: &[bool]) -> Vec<T> {
    items
        .iter()
        .zip(marks)
        .filter_map(|(item, &keep)| keep.then_some(*item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Point3, Vector3};

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
    fn all_referenced_keeps_everything() {
        let mut mesh = scenario_mesh();
        let before = mesh.clone();

        let summary = compact_vertices(&mut mesh).unwrap();
        assert_eq!(summary.final_vertices, 4);
        assert!(!summary.had_changes());
        assert_eq!(mesh, before);
    }

    #[test]
    fn removes_interleaved_orphans() {
        let mut mesh = Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0), // 0 orphan
                Point3::new(1.0, 0.0, 0.0), // 1 -> 0
                Point3::new(2.0, 0.0, 0.0), // 2 orphan
                Point3::new(3.0, 0.0, 0.0), // 3 -> 1
                Point3::new(4.0, 0.0, 0.0), // 4 -> 2
                Point3::new(5.0, 0.0, 0.0), // 5 orphan
            ],
            vec![[4, 1, 3], [3, 4, 1]],
        )
        .with_normals(vec![
            Vector3::x(),
            Vector3::y(),
            Vector3::z(),
            -Vector3::x(),
            -Vector3::y(),
            -Vector3::z(),
        ]);

        let summary = compact_vertices(&mut mesh).unwrap();
        assert_eq!(summary.removed, 3);
        assert_eq!(
            mesh.vertices,
            vec![
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
            ]
        );
        assert_eq!(mesh.normals, vec![Vector3::y(), -Vector3::x(), -Vector3::y()]);
        assert_eq!(mesh.triangles, vec![[2, 0, 1], [1, 2, 0]]);
    }

    #[test]
    fn no_triangles_removes_all_vertices() {
        let mut mesh = scenario_mesh();
        mesh.triangles.clear();

        let summary = compact_vertices(&mut mesh).unwrap();
        assert_eq!(summary.removed, 4);
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn out_of_range_leaves_mesh_unmodified() {
        let mut mesh = scenario_mesh();
        mesh.vertices.push(Point3::new(9.0, 9.0, 9.0)); // orphan that would be removed
        mesh.triangles.push([1, 2, 17]);
        let before = mesh.clone();

        let err = compact_vertices(&mut mesh).unwrap_err();
        assert_eq!(
            err,
            RepairError::DataInconsistency {
                triangle: 2,
                index: 17,
                vertex_count: 5,
            }
        );
        assert_eq!(mesh, before);
    }

    #[test]
    fn normals_mismatch_leaves_mesh_unmodified() {
        let mut mesh = scenario_mesh().with_normals(vec![Vector3::z(); 3]);
        let before = mesh.clone();

        let err = compact_vertices(&mut mesh).unwrap_err();
        assert!(matches!(err, RepairError::NormalsMismatch { normal_count: 3, vertex_count: 4 }));
        assert_eq!(mesh, before);
    }

    #[test]
    fn summary_display() {
        let summary = CompactSummary {
            initial_vertices: 10,
            final_vertices: 7,
            removed: 3,
        };
        let text = format!("{summary}");
        assert!(text.contains("10 -> 7"));
        assert!(text.contains("3 unreferenced"));
    }
}
