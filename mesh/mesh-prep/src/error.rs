//! Error types for the preparation pipeline.

use std::fmt;

use mesh_repair::RepairError;
use mesh_transform::TransformError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PrepResult<T> = Result<T, PrepError>;

/// Pipeline stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Unreferenced-vertex removal.
    Compact,
    /// Principal-axis pose canonicalization.
    Canonicalize,
    /// Uniform rescaling.
    Rescale,
}

impl Stage {
    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Canonicalize => "canonicalize",
            Self::Rescale => "rescale",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying error raised by a stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StageError {
    /// Triangle or normal data disagrees with the vertex list.
    #[error(transparent)]
    Repair(#[from] RepairError),

    /// Geometric transformation failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Coarse classification of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Indices or normals disagree with the vertex list.
    DataInconsistency,
    /// Vertices do not span three dimensions (an empty mesh included), or
    /// the axis solve failed.
    DegenerateGeometry,
    /// A rescale reference length was zero or not finite.
    DivideByZero,
    /// The requested target scale was not finite and positive.
    InvalidInput,
}

/// A stage failure. The pipeline stops at the first one.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{stage} stage failed: {source}")]
pub struct PrepError {
    /// Stage that failed.
    pub stage: Stage,
    /// What went wrong.
    pub source: StageError,
}

impl PrepError {
    /// Wrap a stage error.
    pub fn new(stage: Stage, source: impl Into<StageError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// Classify the failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match &self.source {
            StageError::Repair(
                RepairError::DataInconsistency { .. } | RepairError::NormalsMismatch { .. },
            )
            | StageError::Transform(TransformError::NormalsMismatch { .. }) => {
                FailureKind::DataInconsistency
            }
            StageError::Transform(
                TransformError::DegenerateGeometry { .. } | TransformError::NotInvertible,
            ) => FailureKind::DegenerateGeometry,
            StageError::Transform(TransformError::DivideByZero { .. }) => {
                FailureKind::DivideByZero
            }
            StageError::Transform(TransformError::InvalidScale { .. }) => {
                FailureKind::InvalidInput
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_transform::ScalePolicy;

    #[test]
    fn kind_classification() {
        let err = PrepError::new(
            Stage::Compact,
            RepairError::DataInconsistency {
                triangle: 0,
                index: 9,
                vertex_count: 3,
            },
        );
        assert_eq!(err.kind(), FailureKind::DataInconsistency);

        let err = PrepError::new(
            Stage::Canonicalize,
            TransformError::DegenerateGeometry {
                rank: 1,
                vertex_count: 3,
            },
        );
        assert_eq!(err.kind(), FailureKind::DegenerateGeometry);

        let err = PrepError::new(
            Stage::Rescale,
            TransformError::DivideByZero {
                policy: ScalePolicy::Min,
            },
        );
        assert_eq!(err.kind(), FailureKind::DivideByZero);

        let err = PrepError::new(Stage::Rescale, TransformError::InvalidScale { scale: -1.0 });
        assert_eq!(err.kind(), FailureKind::InvalidInput);

        let err = PrepError::new(
            Stage::Rescale,
            TransformError::NormalsMismatch {
                normal_count: 1,
                vertex_count: 2,
            },
        );
        assert_eq!(err.kind(), FailureKind::DataInconsistency);
    }

    #[test]
    fn display_names_stage() {
        let err = PrepError::new(Stage::Canonicalize, TransformError::NotInvertible);
        assert_eq!(
            err.to_string(),
            "canonicalize stage failed: principal axis matrix is not invertible"
        );
    }
}
