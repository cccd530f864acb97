//! Filesystem utilities.

use std::fs::{self, FileTimes, Metadata};
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Copy a regular file, following symlinks, and carry over its timestamps.
///
/// Permissions are carried over by [`fs::copy`] itself.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst).with_context(|| {
        format!("failed to copy {} to {}", src.display(), dst.display())
    })?;
    let meta = fs::metadata(src)
        .with_context(|| format!("failed to stat {}", src.display()))?;
    copy_times(&meta, dst)
        .with_context(|| format!("failed to set timestamps on {}", dst.display()))
}

/// Copy a single filesystem entry without following symlinks.
///
/// Symlinks are recreated as links pointing at the same target; regular
/// files are copied with [`copy_file`].
pub fn copy_entry_no_follow(src: &Path, dst: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(src)
        .with_context(|| format!("failed to stat {}", src.display()))?;

    if meta.file_type().is_symlink() {
        let target = fs::read_link(src)
            .with_context(|| format!("failed to read link {}", src.display()))?;
        symlink(&target, dst)
            .with_context(|| format!("failed to create symlink: {}", dst.display()))?;
        return Ok(());
    }

    copy_file(src, dst)
}

fn copy_times(meta: &Metadata, dst: &Path) -> io::Result<()> {
    let mut times = FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    // futimens only needs ownership, so read-only copies can still be stamped.
    #[cfg(unix)]
    let file = fs::File::open(dst)?;
    #[cfg(not(unix))]
    let file = fs::File::options().write(true).open(dst)?;
    file.set_times(times)
}

/// Create a symlink (platform-aware).
#[cfg(unix)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}
