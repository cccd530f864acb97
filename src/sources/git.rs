//! Git working tree - tracked files and the current revision.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::process::{CommandRunner, ProcessBuilder};

/// A git checkout queried through a [`CommandRunner`].
pub struct GitRepo<'a> {
    runner: &'a dyn CommandRunner,
    git: PathBuf,
    root: PathBuf,
}

impl<'a> GitRepo<'a> {
    pub fn new(runner: &'a dyn CommandRunner, git: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        GitRepo {
            runner,
            git: git.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn command(&self) -> ProcessBuilder {
        ProcessBuilder::new(&self.git).cwd(&self.root)
    }

    /// All tracked paths, relative to the repository root.
    pub fn ls_files(&self) -> Result<Vec<PathBuf>> {
        let output = self
            .runner
            .run_checked(&self.command().args(["ls-files", "-z"]))?;
        parse_nul_separated(&output.stdout)
    }

    /// Abbreviated hash of `HEAD`; empty if git printed nothing.
    pub fn short_revision(&self) -> Result<String> {
        let output = self
            .runner
            .run_checked(&self.command().args(["rev-parse", "--short", "HEAD"]))?;
        Ok(output.stdout_lossy().trim_end().to_string())
    }
}

/// Split `-z` output into paths, ignoring the trailing terminator.
pub fn parse_nul_separated(bytes: &[u8]) -> Result<Vec<PathBuf>> {
    let bytes = bytes.strip_suffix(b"\0").unwrap_or(bytes);
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    bytes
        .split(|&b| b == 0)
        .map(|raw| {
            let path = std::str::from_utf8(raw)
                .with_context(|| format!("tracked path is not valid UTF-8: {:?}", raw))?;
            Ok(PathBuf::from(path))
        })
        .collect()
}
