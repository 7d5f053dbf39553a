//! Pipeline configuration.

use mesh_transform::PoseParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`clean`](crate::clean).
///
/// # Example
///
/// ```
/// use mesh_prep::PrepParams;
///
/// let params = PrepParams::default()
///     .with_rank_tolerance(1e-8)
///     .with_renormalize_normals(true);
/// assert!(params.pose.renormalize_normals);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrepParams {
    /// Settings for the pose canonicalization stage.
    pub pose: PoseParams,
}

impl PrepParams {
    /// Replace the pose settings.
    #[must_use]
    pub fn with_pose(mut self, pose: PoseParams) -> Self {
        self.pose = pose;
        self
    }

    /// Set the relative eigenvalue threshold below which a principal
    /// direction counts as collapsed.
    #[must_use]
    pub fn with_rank_tolerance(mut self, tolerance: f64) -> Self {
        self.pose = self.pose.with_rank_tolerance(tolerance);
        self
    }

    /// Set whether normals are rescaled to unit length after rotation.
    #[must_use]
    pub fn with_renormalize_normals(mut self, renormalize: bool) -> Self {
        self.pose = self.pose.with_renormalize_normals(renormalize);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_pose_default() {
        assert_eq!(PrepParams::default().pose, PoseParams::default());
    }

    #[test]
    fn builders_forward_to_pose() {
        let params = PrepParams::default().with_rank_tolerance(1e-6);
        assert!((params.pose.rank_tolerance - 1e-6).abs() < f64::EPSILON);
        assert!(!params.pose.renormalize_normals);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_config() {
        let params: PrepParams =
            serde_json::from_str(r#"{"pose":{"renormalize_normals":true}}"#).unwrap();
        assert!(params.pose.renormalize_normals);
        assert!((params.pose.rank_tolerance - 1e-10).abs() < f64::EPSILON);
    }
}
