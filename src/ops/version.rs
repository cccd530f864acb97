//! Version resolution from the version file and the current revision.

use std::path::Path;

use anyhow::Result;

use crate::core::Version;
use crate::sources::GitRepo;
use crate::util::errors::DistError;

/// Read the version prefix: the first line of the file, trailing whitespace
/// removed.
pub fn read_version_prefix(path: &Path) -> Result<String, DistError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DistError::VersionFile {
        path: path.to_path_buf(),
        source,
    })?;

    let prefix = contents.lines().next().unwrap_or("").trim_end();
    if prefix.is_empty() {
        return Err(DistError::EmptyVersion {
            path: path.to_path_buf(),
        });
    }

    Ok(prefix.to_string())
}

/// Resolve the distribution version.
///
/// The version file is required. An empty revision is accepted, but a git
/// invocation that cannot run or exits non-zero is fatal.
pub fn resolve_version(version_file: &Path, repo: &GitRepo<'_>) -> Result<Version> {
    let prefix = read_version_prefix(version_file)?;
    let revision = repo.short_revision()?;
    if revision.is_empty() {
        tracing::warn!("no revision available; the version will not record a commit");
    }
    Ok(Version::new(prefix, revision))
}
