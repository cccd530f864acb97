//! Generated `dist/CMakeLists.txt`.
//!
//! The project's build includes this file when present. It pins the version,
//! the pre-built artifact and every vendored dependency to paths inside
//! `dist/`, so dependency resolution uses local sources instead of fetching.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::Version;
use crate::ops::select::Selection;
use crate::util::config::DistConfig;
use crate::util::fs::write_string;

/// File name of the generated configuration inside `dist/`.
pub const DIST_CMAKELISTS: &str = "CMakeLists.txt";

const PROVENANCE: &str = "# Generated by make-src-dist";

fn source_dir_pin(out: &mut String, name: &str) {
    writeln!(
        out,
        "set(FETCHCONTENT_SOURCE_DIR_{} \"${{CMAKE_CURRENT_SOURCE_DIR}}/{}-src\" CACHE STRING \"\")",
        name.to_uppercase(),
        name
    )
    .unwrap();
}

/// Render the configuration. Pure: identical inputs give identical bytes.
pub fn render_dist_cmakelists(
    config: &DistConfig,
    version: &Version,
    selection: &Selection,
) -> String {
    let mut out = String::new();
    out.push_str(PROVENANCE);
    out.push('\n');

    if version.has_revision() {
        writeln!(
            out,
            "set(GIT_COMMIT_HASH \"{}\" PARENT_SCOPE)",
            version.revision()
        )
        .unwrap();
    }

    let artifact = &config.artifact;
    write!(
        out,
        "
# Pre-generated `{file}` is provided so that distributions do not need the host tools that build it.
set({var} \"${{CMAKE_CURRENT_SOURCE_DIR}}/{file}\" PARENT_SCOPE)

# This would ensure that CMake does not attempt to connect to network.
# We do not set this to allow for builds for Windows and Android, which do fetch some
# dependencies even with this source distribution.
# set(FETCHCONTENT_FULLY_DISCONNECTED ON PARENT_SCOPE)

# Set the path to each dependency that must be vendored:
",
        file = artifact.file,
        var = artifact.variable,
    )
    .unwrap();

    let catalog = &config.catalog;
    let is_full_only = |name: &str| catalog.get(name).is_some_and(|d| d.fully_vendored_only());

    for name in selection.copy_list() {
        if catalog.get(name).is_some() && !is_full_only(name.as_str()) {
            source_dir_pin(&mut out, name);
        }
    }

    if selection.mode().is_fully_vendored() {
        out.push_str(
            "\n# These dependencies are not usually vendored but this distribution includes them\n",
        );
        source_dir_pin(&mut out, &config.integration.name);

        for name in selection.copy_list() {
            let Some(dep) = catalog.get(name).filter(|d| d.fully_vendored_only()) else {
                continue;
            };
            source_dir_pin(&mut out, &dep.name);

            // Never clobber a system-package choice made by the invoker.
            let var = config.system_variable(&dep.cmake_name());
            write!(
                out,
                "if(NOT DEFINED {var})\n  set({var} OFF CACHE BOOL \"\")\nendif()\n",
            )
            .unwrap();
        }
    }

    out
}

/// Write the configuration into `dist_dir` and return its path.
pub fn write_dist_cmakelists(
    dist_dir: &Path,
    config: &DistConfig,
    version: &Version,
    selection: &Selection,
) -> Result<PathBuf> {
    let path = dist_dir.join(DIST_CMAKELISTS);
    write_string(&path, &render_dist_cmakelists(config, version, selection))?;
    Ok(path)
}
