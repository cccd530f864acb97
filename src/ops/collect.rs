//! Staging the repository's tracked files.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::errors::DistError;
use crate::util::fs::{copy_entry_no_follow, ensure_dir};

/// Marker file that only exists to keep an empty directory under version
/// control.
const PLACEHOLDER: &str = ".gitkeep";

fn is_placeholder(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == PLACEHOLDER)
}

/// Copy every tracked path from `root` to the same relative path under
/// `dest`, keeping symlinks as links. Returns the number of entries copied.
///
/// Placeholder files are skipped, but their directory is still created so
/// it survives in the archive.
pub fn collect_sources(root: &Path, tracked: &[PathBuf], dest: &Path) -> Result<usize> {
    tracing::info!("Copying repo files...");

    let mut copied = 0;
    for rel in tracked {
        let src = root.join(rel);
        let dst = dest.join(rel);

        if let Some(parent) = dst.parent() {
            ensure_dir(parent)?;
        }
        if is_placeholder(rel) {
            continue;
        }

        if src.symlink_metadata().is_err() {
            return Err(DistError::MissingTrackedFile { path: src }.into());
        }
        copy_entry_no_follow(&src, &dst)?;
        copied += 1;
    }

    tracing::debug!("copied {} tracked files", copied);
    Ok(copied)
}
