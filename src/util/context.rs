//! Paths of a source-distribution run.
//!
//! Every location the pipeline touches is derived from the repository root
//! and the project configuration, so the layout is fixed per checkout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::DistConfig;
use crate::util::errors::DistError;

/// Resolved locations for one run.
#[derive(Debug, Clone)]
pub struct DistContext {
    root: PathBuf,
    version_file: PathBuf,
    build_dir: PathBuf,
    artifact_file: String,
}

impl DistContext {
    /// Locate the repository root by walking up from the current directory.
    pub fn discover(config: &DistConfig) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let root = find_root(&cwd, &config.project.version_file)?;
        Ok(Self::with_root(root, config))
    }

    /// Create a context for a known repository root.
    pub fn with_root(root: impl Into<PathBuf>, config: &DistConfig) -> Self {
        let root = root.into();
        DistContext {
            version_file: root.join(&config.project.version_file),
            build_dir: root.join(&config.project.build_dir),
            artifact_file: config.artifact.file.clone(),
            root,
        }
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Single-line version file.
    pub fn version_file(&self) -> &Path {
        &self.version_file
    }

    /// Build-output root (configure/build directory).
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Staging root; destroyed and recreated on every run.
    pub fn staging_root(&self) -> PathBuf {
        self.build_dir.join("archive")
    }

    /// Area where the configure step fetches dependency sources.
    pub fn deps_dir(&self) -> PathBuf {
        self.build_dir.join("_deps")
    }

    /// Binary artifact produced by the build step.
    pub fn artifact_path(&self) -> PathBuf {
        self.build_dir.join(&self.artifact_file)
    }
}

/// Walk up from `start` to the first directory containing `marker`.
pub fn find_root(start: &Path, marker: &Path) -> Result<PathBuf, DistError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(marker).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(DistError::RootNotFound {
                marker: marker.display().to_string(),
                dir: start.to_path_buf(),
            });
        }
    }
}
