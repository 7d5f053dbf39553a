//! A mesh bound to its source path.

use std::path::{Path, PathBuf};

use mesh_transform::RescaleTarget;
use mesh_types::Mesh;

use crate::artifact::{
    ArtifactError, ArtifactGenerator, ArtifactKind, ArtifactPaths, generate_artifact,
    generate_artifacts,
};
use crate::error::PrepResult;
use crate::params::PrepParams;
use crate::pipeline::{CleanReport, RescaleReport, clean, rescale};

/// Owns a mesh being prepared and knows where its artifacts go.
///
/// # Example
///
/// ```
/// use mesh_prep::{MeshProcessor, PrepParams};
/// use mesh_transform::{RescaleTarget, ScalePolicy};
/// use mesh_types::{Mesh, Point3};
///
/// let mesh = Mesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(5.0, 5.0, 5.0),
///     ],
///     vec![[0, 1, 2], [0, 1, 3]],
/// );
///
/// let mut processor = MeshProcessor::new(mesh, "models/bracket.obj");
/// processor.clean(&PrepParams::default()).unwrap();
/// processor.rescale(&RescaleTarget::new(0.1, ScalePolicy::Max)).unwrap();
///
/// assert_eq!(processor.file_root().to_str(), Some("models/bracket"));
/// let mesh = processor.into_mesh();
/// assert!((mesh.bounds().max_extent() - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct MeshProcessor {
    mesh: Mesh,
    paths: ArtifactPaths,
}

impl MeshProcessor {
    /// Take ownership of `mesh`, loaded from `source`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(mesh: Mesh, source: P) -> Self {
        Self {
            mesh,
            paths: ArtifactPaths::from_source(source),
        }
    }

    /// The mesh in its current state.
    #[must_use]
    pub const fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Source path with its extension stripped.
    #[must_use]
    pub fn file_root(&self) -> &Path {
        self.paths.root()
    }

    /// Output locations for this mesh.
    #[must_use]
    pub const fn artifact_paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Run [`clean`] on the owned mesh.
    ///
    /// # Errors
    ///
    /// See [`clean`].
    pub fn clean(&mut self, params: &PrepParams) -> PrepResult<CleanReport> {
        clean(&mut self.mesh, params)
    }

    /// Run [`rescale`] on the owned mesh.
    ///
    /// # Errors
    ///
    /// See [`rescale`].
    pub fn rescale(&mut self, target: &RescaleTarget) -> PrepResult<RescaleReport> {
        rescale(&mut self.mesh, target)
    }

    /// Produce one artifact from the current mesh.
    ///
    /// # Errors
    ///
    /// Returns the generator's error.
    pub fn generate_artifact(
        &self,
        generator: &dyn ArtifactGenerator,
    ) -> Result<PathBuf, ArtifactError> {
        generate_artifact(&self.mesh, &self.paths, generator)
    }

    /// Produce every artifact, continuing past failures.
    pub fn generate_artifacts(
        &self,
        generators: &[&dyn ArtifactGenerator],
    ) -> Vec<(ArtifactKind, Result<PathBuf, ArtifactError>)> {
        generate_artifacts(&self.mesh, &self.paths, generators)
    }

    /// Release the mesh.
    #[must_use]
    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }
}
