//! Property-based tests for triangle validation and vertex compaction.
//!
//! These tests use proptest to generate raw meshes (including out-of-range
//! and repeated indices) and verify the cleaning invariants.
//!
//! Run with: cargo test -p mesh-repair -- proptest

use std::collections::BTreeSet;

use mesh_repair::{
    RepairError, compact_vertices, is_valid_triangle, remove_invalid_triangles,
    validate_triangles,
};
use mesh_types::{Mesh, Point3, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies for generating raw meshes
// =============================================================================

/// Generate a random vertex position in a bounded range.
fn arb_position() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// Generate a raw mesh whose triangle indices may overshoot the vertex
/// count by up to `overshoot` and may repeat indices.
fn arb_raw_mesh(
    max_vertices: usize,
    max_triangles: usize,
    overshoot: u32,
) -> impl Strategy<Value = Mesh> {
    (1..=max_vertices).prop_flat_map(move |num_vertices| {
        let vertices = prop::collection::vec(arb_position(), num_vertices);
        let upper = num_vertices as u32 + overshoot;
        let triangles =
            prop::collection::vec(prop::array::uniform3(0..upper), 0..=max_triangles);
        let with_normals = any::<bool>();

        (vertices, triangles, with_normals).prop_map(|(verts, tris, with_normals)| {
            let normals = if with_normals {
                verts.iter().map(|_| Vector3::z()).collect()
            } else {
                Vec::new()
            };
            Mesh::from_parts(verts, tris).with_normals(normals)
        })
    })
}

// =============================================================================
// Property Tests: Validation
// =============================================================================

proptest! {
    /// Every surviving triangle satisfies the predicate.
    #[test]
    fn validation_output_is_valid(mesh in arb_raw_mesh(30, 60, 5)) {
        let mut cleaned = mesh.clone();
        remove_invalid_triangles(&mut cleaned);

        let n = cleaned.vertices.len();
        for tri in &cleaned.triangles {
            prop_assert!(is_valid_triangle(*tri, n), "{:?} survived validation", tri);
        }
        prop_assert_eq!(cleaned.vertices, mesh.vertices);
    }

    /// Validating already-validated triangles changes nothing.
    #[test]
    fn validation_is_idempotent(mesh in arb_raw_mesh(30, 60, 5)) {
        let n = mesh.vertices.len();
        let once = validate_triangles(&mesh.triangles, n);
        let twice = validate_triangles(&once, n);
        prop_assert_eq!(once, twice);
    }

    /// Surviving triangles keep their relative order.
    #[test]
    fn validation_preserves_order(mesh in arb_raw_mesh(20, 40, 3)) {
        let n = mesh.vertices.len();
        let kept = validate_triangles(&mesh.triangles, n);
        let expected: Vec<[u32; 3]> = mesh
            .triangles
            .iter()
            .copied()
            .filter(|&t| is_valid_triangle(t, n))
            .collect();
        prop_assert_eq!(kept, expected);
    }
}

// =============================================================================
// Property Tests: Compaction
// =============================================================================

proptest! {
    /// After validation, compaction always succeeds and produces a compact mesh.
    #[test]
    fn compaction_after_validation_is_compact(mesh in arb_raw_mesh(30, 60, 5)) {
        let mut cleaned = mesh;
        remove_invalid_triangles(&mut cleaned);
        let summary = compact_vertices(&mut cleaned);

        prop_assert!(summary.is_ok());
        prop_assert!(cleaned.check_invariants().is_compact());
    }

    /// The retained vertices are exactly the referenced ones, in order, and
    /// each triangle still points at the same positions.
    #[test]
    fn compaction_keeps_referenced_set(mesh in arb_raw_mesh(30, 60, 0)) {
        let mut input = mesh;
        remove_invalid_triangles(&mut input);

        let referenced: BTreeSet<u32> = input.triangles.iter().flatten().copied().collect();
        let expected_vertices: Vec<Point3<f64>> = referenced
            .iter()
            .map(|&i| input.vertices[i as usize])
            .collect();

        let mut output = input.clone();
        compact_vertices(&mut output).unwrap();

        prop_assert_eq!(&output.vertices, &expected_vertices);
        prop_assert_eq!(output.triangles.len(), input.triangles.len());
        for (before, after) in input.triangles.iter().zip(&output.triangles) {
            for k in 0..3 {
                prop_assert_eq!(
                    input.vertices[before[k] as usize],
                    output.vertices[after[k] as usize]
                );
            }
        }
        if input.has_normals() {
            prop_assert_eq!(output.normals.len(), output.vertices.len());
        }
    }

    /// Compacting twice is the same as compacting once.
    #[test]
    fn compaction_is_idempotent(mesh in arb_raw_mesh(30, 60, 0)) {
        let mut once = mesh;
        remove_invalid_triangles(&mut once);
        compact_vertices(&mut once).unwrap();

        let mut twice = once.clone();
        let summary = compact_vertices(&mut twice).unwrap();

        prop_assert_eq!(summary.removed, 0);
        prop_assert_eq!(once, twice);
    }

    /// Out-of-range indices are reported and the mesh is untouched.
    #[test]
    fn compaction_rejects_unvalidated_input(mesh in arb_raw_mesh(20, 40, 4)) {
        let n = mesh.vertices.len();
        let has_bad = mesh.triangles.iter().flatten().any(|&i| i as usize >= n);

        let mut output = mesh.clone();
        let result = compact_vertices(&mut output);

        if has_bad {
            let is_inconsistent = matches!(result, Err(RepairError::DataInconsistency { .. }));
            prop_assert!(is_inconsistent);
            prop_assert_eq!(output, mesh);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}

// =============================================================================
// Scenario
// =============================================================================

#[test]
fn scenario_keeps_two_triangles_and_four_vertices() {
    let mut mesh = Mesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ],
        vec![[0, 1, 2], [0, 1, 3], [0, 0, 1]],
    );

    assert_eq!(remove_invalid_triangles(&mut mesh), 1);
    assert_eq!(mesh.triangles, vec![[0, 1, 2], [0, 1, 3]]);

    let summary = compact_vertices(&mut mesh).unwrap();
    assert_eq!(summary.final_vertices, 4);
}
