//! Building the binary artifact embedded in the distribution.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::CMakeBuilder;
use crate::ops::select::Selection;
use crate::util::config::DistConfig;
use crate::util::context::DistContext;
use crate::util::errors::DistError;
use crate::util::process::CommandRunner;

/// Configure the project with the selection's flags, build the artifact
/// target, and return the artifact path.
///
/// The configure step also fetches every dependency into the build
/// directory; later stages copy from there.
pub fn build_artifact(
    ctx: &DistContext,
    config: &DistConfig,
    selection: &Selection,
    runner: &dyn CommandRunner,
    cmake: &Path,
) -> Result<PathBuf> {
    CMakeBuilder::new(runner, cmake, ctx.root(), ctx.build_dir())
        .args(config.project.configure_args.iter().cloned())
        .args(selection.configure_flags())
        .targets([config.artifact.target.clone()])
        .build()?;

    let artifact = ctx.artifact_path();
    if !artifact.is_file() {
        return Err(DistError::MissingArtifact { path: artifact }.into());
    }
    Ok(artifact)
}
