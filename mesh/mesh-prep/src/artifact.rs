//! Downstream artifact generation.
//!
//! Signed distance fields, local shape features, convex decompositions and
//! stable poses are computed by external tools from a cleaned mesh. This
//! module fixes where their outputs go and how a tool is invoked; the tools
//! themselves implement [`ArtifactGenerator`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mesh_types::Mesh;
use thiserror::Error;
use tracing::{info, warn};

/// Suffix of the decimated mesh handed to external tools.
const DEC_TAG: &str = "_dec";

/// Kind of downstream artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    /// Signed distance field on a regular grid.
    SignedDistanceField,
    /// Local shape descriptors.
    LocalFeatures,
    /// Approximate convex decomposition.
    ConvexPieces,
    /// Resting poses on a plane with their probabilities.
    StablePoses,
}

impl ArtifactKind {
    /// All artifact kinds.
    pub const ALL: [Self; 4] = [
        Self::SignedDistanceField,
        Self::LocalFeatures,
        Self::ConvexPieces,
        Self::StablePoses,
    ];

    /// File extension of this artifact.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::SignedDistanceField => "sdf",
            Self::LocalFeatures => "ftr",
            Self::ConvexPieces => "wrl",
            Self::StablePoses => "stp",
        }
    }

    /// Suffix appended to the file root before the extension.
    const fn suffix(&self) -> &'static str {
        match self {
            Self::SignedDistanceField => DEC_TAG,
            Self::ConvexPieces => "_dec_hacd",
            Self::LocalFeatures | Self::StablePoses => "",
        }
    }

    /// Detect the kind from an artifact path's extension.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "sdf" => Some(Self::SignedDistanceField),
            "ftr" => Some(Self::LocalFeatures),
            "wrl" => Some(Self::ConvexPieces),
            "stp" => Some(Self::StablePoses),
            _ => None,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SignedDistanceField => "signed distance field",
            Self::LocalFeatures => "local features",
            Self::ConvexPieces => "convex pieces",
            Self::StablePoses => "stable poses",
        })
    }
}

/// Output locations derived from a source mesh path.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use mesh_prep::{ArtifactKind, ArtifactPaths};
///
/// let paths = ArtifactPaths::from_source("data/mug.obj");
/// assert_eq!(paths.export_mesh(), Path::new("data/mug_dec.obj"));
/// assert_eq!(
///     paths.artifact(ArtifactKind::SignedDistanceField),
///     Path::new("data/mug_dec.sdf")
/// );
/// assert_eq!(paths.artifact(ArtifactKind::LocalFeatures), Path::new("data/mug.ftr"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    root: PathBuf,
}

impl ArtifactPaths {
    /// Strip the extension of `source` to get the file root.
    #[must_use]
    pub fn from_source<P: AsRef<Path>>(source: P) -> Self {
        Self {
            root: source.as_ref().with_extension(""),
        }
    }

    /// File root shared by every artifact.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the cleaned mesh is written for external tools.
    #[must_use]
    pub fn export_mesh(&self) -> PathBuf {
        self.with_suffix(DEC_TAG, "obj")
    }

    /// Where an artifact of `kind` is written.
    ///
    /// For [`ArtifactKind::ConvexPieces`] this is the first piece; tools
    /// may number further pieces after the `_hacd` tag.
    #[must_use]
    pub fn artifact(&self, kind: ArtifactKind) -> PathBuf {
        self.with_suffix(kind.suffix(), kind.extension())
    }

    /// Prefix shared by every convex piece file.
    #[must_use]
    pub fn convex_piece_prefix(&self) -> PathBuf {
        let mut name = self.root.clone().into_os_string();
        name.push(ArtifactKind::ConvexPieces.suffix());
        PathBuf::from(name)
    }

    fn with_suffix(&self, suffix: &str, extension: &str) -> PathBuf {
        let mut name = self.root.clone().into_os_string();
        name.push(suffix);
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }
}

/// Errors reported by an [`ArtifactGenerator`].
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The tool ran and reported failure.
    #[error("{kind} generation failed: {message}")]
    Failed {
        /// Artifact being generated.
        kind: ArtifactKind,
        /// Tool-provided description.
        message: String,
    },

    /// The tool finished but the expected output does not exist.
    #[error("{kind} output missing: {}", .path.display())]
    MissingOutput {
        /// Artifact being generated.
        kind: ArtifactKind,
        /// Path that should have been written.
        path: PathBuf,
    },

    /// The tool exceeded its time limit.
    #[error("{kind} generation timed out after {elapsed:?}")]
    TimedOut {
        /// Artifact being generated.
        kind: ArtifactKind,
        /// Time spent before giving up.
        elapsed: Duration,
    },

    /// I/O error while exporting the mesh or reading the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A producer of one kind of downstream artifact.
///
/// Implementors own the external process: exporting the mesh, invoking the
/// tool, enforcing a timeout and checking that output exists.
pub trait ArtifactGenerator {
    /// Kind of artifact produced.
    fn kind(&self) -> ArtifactKind;

    /// Produce the artifact for `mesh` at `target`.
    ///
    /// Returns the path actually written, which may differ from `target`
    /// (e.g. a numbered convex piece).
    ///
    /// # Errors
    ///
    /// Returns an [`ArtifactError`] if the artifact could not be produced.
    fn generate(&self, mesh: &Mesh, target: &Path) -> Result<PathBuf, ArtifactError>;
}

/// Run one generator, targeting its kind's path under `paths`.
///
/// # Errors
///
/// Returns the generator's error unchanged.
pub fn generate_artifact(
    mesh: &Mesh,
    paths: &ArtifactPaths,
    generator: &dyn ArtifactGenerator,
) -> Result<PathBuf, ArtifactError> {
    let kind = generator.kind();
    let target = paths.artifact(kind);
    match generator.generate(mesh, &target) {
        Ok(path) => {
            info!(%kind, path = %path.display(), "Generated artifact");
            Ok(path)
        }
        Err(err) => {
            warn!(%kind, target = %target.display(), error = %err, "Artifact generation failed");
            Err(err)
        }
    }
}

/// Run every generator once.
///
/// Artifacts are independent, so a failure is recorded and the remaining
/// generators still run. Results are returned in generator order.
pub fn generate_artifacts(
    mesh: &Mesh,
    paths: &ArtifactPaths,
    generators: &[&dyn ArtifactGenerator],
) -> Vec<(ArtifactKind, Result<PathBuf, ArtifactError>)> {
    generators
        .iter()
        .map(|generator| (generator.kind(), generate_artifact(mesh, paths, *generator)))
        .collect()
}
