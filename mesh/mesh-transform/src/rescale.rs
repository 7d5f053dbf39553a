//! Uniform rescaling to a target physical size.

use std::fmt;
use std::str::FromStr;

use mesh_types::Mesh;
use nalgebra::Vector3;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{TransformError, TransformResult, check_normals};

/// Which measurement of the mesh the target scale refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScalePolicy {
    /// Shortest bounding-box extent becomes the target.
    #[default]
    Min,
    /// Median bounding-box extent becomes the target.
    Med,
    /// Longest bounding-box extent becomes the target.
    Max,
    /// The target is used directly as the scale factor.
    Absolute,
    /// Bounding-box diagonal becomes the target.
    Diagonal,
}

impl ScalePolicy {
    /// All policies, in legacy code order.
    pub const ALL: [Self; 5] = [Self::Min, Self::Med, Self::Max, Self::Absolute, Self::Diagonal];

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Med => "med",
            Self::Max => "max",
            Self::Absolute => "absolute",
            Self::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for ScalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`ScalePolicy`] fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scale policy `{0}`")]
pub struct ParseScalePolicyError(pub String);

impl FromStr for ScalePolicy {
    type Err = ParseScalePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "min" => Ok(Self::Min),
            "med" | "median" => Ok(Self::Med),
            "max" => Ok(Self::Max),
            "absolute" | "abs" => Ok(Self::Absolute),
            "diagonal" | "diag" => Ok(Self::Diagonal),
            _ => Err(ParseScalePolicyError(s.to_string())),
        }
    }
}

/// Legacy integer codes: 0 = min, 1 = med, 2 = max, 3 = absolute, 4 = diagonal.
impl TryFrom<u8> for ScalePolicy {
    type Error = ParseScalePolicyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| ParseScalePolicyError(code.to_string()))
    }
}

/// A target size and the policy it applies to.
///
/// # Example
///
/// ```
/// use mesh_transform::{RescaleTarget, ScalePolicy};
///
/// let target = RescaleTarget::new(0.1, ScalePolicy::Max);
/// assert_eq!(target.policy, ScalePolicy::Max);
/// assert!(target.renormalize_normals);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RescaleTarget {
    /// Target length (or factor, for [`ScalePolicy::Absolute`]). Must be > 0.
    pub scale: f64,
    /// Which extent `scale` refers to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub policy: ScalePolicy,
    /// Rescale normals to unit length afterwards.
    ///
    /// Default: `true`
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub renormalize_normals: bool,
}

#[cfg(feature = "serde")]
const fn default_true() -> bool {
    true
}

impl RescaleTarget {
    /// Target `scale` under `policy`, renormalizing normals.
    #[must_use]
    pub const fn new(scale: f64, policy: ScalePolicy) -> Self {
        Self {
            scale,
            policy,
            renormalize_normals: true,
        }
    }

    /// Set whether normals are renormalized.
    #[must_use]
    pub fn with_renormalize_normals(mut self, renormalize: bool) -> Self {
        self.renormalize_normals = renormalize;
        self
    }
}

/// Reference length of per-axis `extents` under `policy`.
///
/// # Example
///
/// ```
/// use mesh_transform::{ScalePolicy, reference_length};
/// use nalgebra::Vector3;
///
/// let extents = Vector3::new(3.0, 4.0, 12.0);
/// assert_eq!(reference_length(&extents, ScalePolicy::Min), 3.0);
/// assert_eq!(reference_length(&extents, ScalePolicy::Med), 4.0);
/// assert_eq!(reference_length(&extents, ScalePolicy::Max), 12.0);
/// assert_eq!(reference_length(&extents, ScalePolicy::Diagonal), 13.0);
/// assert_eq!(reference_length(&extents, ScalePolicy::Absolute), 1.0);
/// ```
#[must_use]
pub fn reference_length(extents: &Vector3<f64>, policy: ScalePolicy) -> f64 {
    match policy {
        ScalePolicy::Min => extents.min(),
        ScalePolicy::Med => {
            let mut sorted = [extents.x, extents.y, extents.z];
            sorted.sort_by(f64::total_cmp);
            sorted[1]
        }
        ScalePolicy::Max => extents.max(),
        ScalePolicy::Diagonal => extents.norm(),
        ScalePolicy::Absolute => 1.0,
    }
}

/// Scale every vertex uniformly about the origin so the policy's reference
/// length equals `target.scale`.
///
/// Returns the applied scale factor. Triangles are untouched; normals are
/// only renormalized if requested.
///
/// # Errors
///
/// - [`TransformError::InvalidScale`] if the target is not finite and positive
/// - [`TransformError::NormalsMismatch`] if normals are present but not one
///   per vertex
/// - [`TransformError::DivideByZero`] if the reference length is zero or not
///   finite (e.g. a flat mesh under [`ScalePolicy::Min`], or an empty mesh
///   under any policy but [`ScalePolicy::Absolute`])
///
/// # Example
///
/// ```
/// use mesh_transform::{RescaleTarget, ScalePolicy, rescale};
/// use mesh_types::{Mesh, Point3};
///
/// let mut mesh = Mesh::from_parts(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 1.0, 0.5)],
///     vec![],
/// );
///
/// let factor = rescale(&mut mesh, &RescaleTarget::new(10.0, ScalePolicy::Max)).unwrap();
/// assert_eq!(factor, 5.0);
/// assert_eq!(mesh.bounds().max_extent(), 10.0);
/// ```
pub fn rescale(mesh: &mut Mesh, target: &RescaleTarget) -> TransformResult<f64> {
    if !target.scale.is_finite() || target.scale <= 0.0 {
        return Err(TransformError::InvalidScale {
            scale: target.scale,
        });
    }
    check_normals(mesh)?;

    let extents = mesh.bounds().size();
    let reference = reference_length(&extents, target.policy);
    if !reference.is_finite() || reference <= 0.0 {
        return Err(TransformError::DivideByZero {
            policy: target.policy,
        });
    }

    let factor = target.scale / reference;
    mesh.scale(factor);
    if target.renormalize_normals {
        mesh.normalize_normals();
    }

    debug!(
        policy = %target.policy,
        reference,
        factor,
        "Rescaled vertices"
    );
    Ok(factor)
}
