//! Pose canonicalization and rescaling for triangle meshes.
//!
//! This crate provides:
//! - PCA (Principal Component Analysis) of mesh vertices
//! - Pose canonicalization: center, orient by principal axes, rotate to
//!   +Z/+Y/+X, recenter by bounding box
//! - Uniform rescaling to a target extent under a [`ScalePolicy`]
//!
//! # Layer 0
//!
//! Pure numeric code over [`Mesh`](mesh_types::Mesh) values; no I/O.
//!
//! # Example
//!
//! ```
//! use mesh_transform::{PoseParams, RescaleTarget, ScalePolicy, canonicalize_pose, rescale};
//! use mesh_types::{Mesh, Point3};
//!
//! let mut mesh = Mesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(8.0, 0.0, 0.0),
//!         Point3::new(0.0, 3.0, 0.0),
//!         Point3::new(0.0, 0.0, 1.0),
//!         Point3::new(8.0, 3.0, 1.0),
//!     ],
//!     vec![[0, 1, 2], [1, 2, 4], [0, 3, 4]],
//! );
//!
//! let pose = canonicalize_pose(&mut mesh, &PoseParams::default()).unwrap();
//! assert!(pose.rotation.matrix().determinant() > 0.0);
//!
//! rescale(&mut mesh, &RescaleTarget::new(1.0, ScalePolicy::Max)).unwrap();
//! assert!((mesh.bounds().max_extent() - 1.0).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod pca;
mod pose;
mod rescale;

pub use error::{TransformError, TransformResult};
pub use pca::{PcaResult, pca_axes, pca_from_points};
pub use pose::{
    CanonicalPose, PoseParams, SignVote, canonical_targets, canonicalize_pose,
    is_proper_rotation, rotation_to_canonical,
};
pub use rescale::{
    ParseScalePolicyError, RescaleTarget, ScalePolicy, reference_length, rescale,
};
