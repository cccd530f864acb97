//! Compressing the staging tree into a `.tar.xz`.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tar::Builder;
use walkdir::WalkDir;
use xz2::write::XzEncoder;

use crate::core::StagingLayout;
use crate::util::errors::DistError;

/// xz preset, the same default `xz` itself uses.
const XZ_PRESET: u32 = 6;

/// Compress `<staging_root>/<top_level_dir_name>` into
/// `<out_dir>/<top_level_dir_name>.tar.xz` and return the archive path.
///
/// The archive is written under a temporary name and renamed once complete,
/// so an archive at the final path is never truncated.
pub fn create_archive(staging_root: &Path, layout: &StagingLayout, out_dir: &Path) -> Result<PathBuf> {
    let archive_path = out_dir.join(layout.archive_file_name());
    let partial_path = out_dir.join(format!("{}.partial", layout.archive_file_name()));

    tracing::info!("Compressing {}", staging_root.display());

    let result = write_archive(
        &layout.top_level_dir(staging_root),
        layout.top_level_dir_name(),
        &partial_path,
    )
    .and_then(|()| fs::rename(&partial_path, &archive_path));

    if let Err(source) = result {
        let _ = fs::remove_file(&partial_path);
        return Err(DistError::Archive {
            path: archive_path,
            source,
        }
        .into());
    }

    Ok(archive_path)
}

fn write_archive(top_level_dir: &Path, top_level_name: &str, dest: &Path) -> io::Result<()> {
    let file = BufWriter::new(File::create(dest)?);
    let mut builder = Builder::new(XzEncoder::new(file, XZ_PRESET));
    builder.follow_symlinks(false);

    for entry in WalkDir::new(top_level_dir).sort_by_file_name() {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(top_level_dir)
            .map_err(io::Error::other)?;
        let name = if rel.as_os_str().is_empty() {
            PathBuf::from(top_level_name)
        } else {
            Path::new(top_level_name).join(rel)
        };

        if entry.file_type().is_dir() {
            builder.append_dir(&name, entry.path())?;
        } else {
            builder.append_path_with_name(entry.path(), &name)?;
        }
    }

    let encoder = builder.into_inner()?;
    let mut file = encoder.finish()?;
    file.flush()?;
    file.into_inner().map_err(|e| e.into_error())?.sync_all()
}
