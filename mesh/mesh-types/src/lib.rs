//! Core mesh types for mesh preparation.
//!
//! This crate provides the data aggregate every preparation stage works on:
//!
//! - [`Mesh`] - vertices, triangles and optional per-vertex normals
//! - [`Aabb`] - axis-aligned bounding box
//! - [`MeshReport`] - invariant violations found in a mesh
//!
//! # Layer 0 Crate
//!
//! No I/O and no file formats. Loaders and writers live outside this
//! workspace and hand a [`Mesh`] in by value.
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Right-handed. After pose canonicalization the axis of greatest spread
//! is +Z, the next +Y and the least +X.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Mesh, Point3};
//!
//! let mut mesh = Mesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.5, 1.0, 0.0));
//! mesh.triangles.push([0, 1, 2]);
//!
//! assert_eq!(mesh.triangle_count(), 1);
//! assert!(mesh.check_invariants().is_compact());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod report;

pub use bounds::Aabb;
pub use mesh::Mesh;
pub use report::MeshReport;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
