//! Mesh preparation pipeline for object databases.
//!
//! Takes a raw triangle mesh, drops invalid triangles and unreferenced
//! vertices, moves it into a canonical pose and optionally rescales it to a
//! physical size. Downstream artifacts (signed distance fields, features,
//! convex pieces, stable poses) are produced by external tools behind the
//! [`ArtifactGenerator`] trait.
//!
//! # Quick Start
//!
//! ```
//! use mesh_prep::prelude::*;
//!
//! let mut mesh = Mesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(2.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(0.0, 0.0, 0.5),
//!         Point3::new(9.0, 9.0, 9.0), // unreferenced
//!     ],
//!     vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3], [0, 0, 1]],
//! );
//!
//! let report = clean(&mut mesh, &PrepParams::default()).unwrap();
//! assert_eq!(report.triangles_dropped, 1);
//! assert_eq!(report.compact.removed, 1);
//!
//! rescale(&mut mesh, &RescaleTarget::new(0.05, ScalePolicy::Max)).unwrap();
//! ```
//!
//! # Stages
//!
//! | Stage | Crate | Fails with |
//! |-------|-------|------------|
//! | Validate | [`repair`] | never; invalid triangles are dropped |
//! | Compact | [`repair`] | normals/vertex count mismatch, out-of-range index |
//! | Canonicalize | [`transform`] | degenerate geometry (an empty mesh has rank 0) |
//! | Rescale | [`transform`] | invalid scale, zero reference length, normals mismatch |
//!
//! [`clean`] runs the first three and stops at the first failure.
//! [`rescale`] is run separately.
//!
//! # Feature Flags
//!
//! - `serde` - Serialize/deserialize meshes and parameters

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod artifact;
mod error;
mod params;
mod pipeline;
mod processor;

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `Mesh`, `Aabb`, `MeshReport`.
pub use mesh_types as types;

/// Triangle validation and vertex compaction.
pub use mesh_repair as repair;

/// Pose canonicalization and rescaling.
pub use mesh_transform as transform;

pub use artifact::{
    ArtifactError, ArtifactGenerator, ArtifactKind, ArtifactPaths, generate_artifact,
    generate_artifacts,
};
pub use error::{FailureKind, PrepError, PrepResult, Stage, StageError};
pub use params::PrepParams;
pub use pipeline::{CleanReport, RescaleReport, clean, rescale};
pub use processor::MeshProcessor;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh preparation.
///
/// # Usage
///
/// ```
/// use mesh_prep::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, Mesh, MeshReport, Point3, Vector3};

    // Stage parameters
    pub use mesh_transform::{PoseParams, RescaleTarget, ScalePolicy};

    // Pipeline
    pub use crate::{CleanReport, MeshProcessor, PrepError, PrepParams, clean, rescale};

    // Artifacts
    pub use crate::{ArtifactGenerator, ArtifactKind, ArtifactPaths};
}

// =============================================================================
// Tests
// =============================================================================
