//! Triangle validation and vertex compaction for raw triangle meshes.
//!
//! This crate provides the first two cleaning stages:
//! - Triangle validation (drop out-of-range and repeated-index triangles)
//! - Vertex compaction (drop unreferenced vertices and normals, remap indices)
//!
//! Both stages are stateless functions over a [`Mesh`](mesh_types::Mesh).
//!
//! # Example
//!
//! ```
//! use mesh_types::{Mesh, Point3};
//! use mesh_repair::{compact_vertices, remove_invalid_triangles};
//!
//! let mut mesh = Mesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(5.0, 5.0, 5.0),
//!     ],
//!     vec![[0, 1, 2], [3, 3, 1]],
//! );
//!
//! assert_eq!(remove_invalid_triangles(&mut mesh), 1);
//! let summary = compact_vertices(&mut mesh).unwrap();
//! assert_eq!(summary.removed, 1);
//! assert!(mesh.check_invariants().is_compact());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod compact;
mod error;
mod validate;

pub use compact::{CompactSummary, compact_vertices};
pub use error::{RepairError, RepairResult};
pub use validate::{is_valid_triangle, remove_invalid_triangles, validate_triangles};
