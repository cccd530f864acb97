//! Error taxonomy for source-distribution runs.
//!
//! Every variant is fatal: the pipeline has no retries and no partial-success
//! state, so callers only ever propagate these upward.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error raised while assembling a source distribution.
#[derive(Debug, Error, Diagnostic)]
pub enum DistError {
    #[error("failed to read version file: {}", path.display())]
    #[diagnostic(
        code(srcdist::config::version_file),
        help("the repository root must contain a single-line `VERSION` file")
    )]
    VersionFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("version file is empty: {}", path.display())]
    #[diagnostic(code(srcdist::config::empty_version))]
    EmptyVersion { path: PathBuf },

    #[error("could not find `{marker}` in {} or any parent directory", dir.display())]
    #[diagnostic(
        code(srcdist::config::root_not_found),
        help("run make-src-dist from inside the repository checkout")
    )]
    RootNotFound { marker: String, dir: PathBuf },

    #[error("`{tool}` not found")]
    #[diagnostic(
        code(srcdist::process::tool_not_found),
        help("install {tool} and ensure it is in your PATH, or point ${env} at it")
    )]
    ToolNotFound { tool: String, env: String },

    #[error("failed to spawn `{command}`")]
    #[diagnostic(code(srcdist::process::spawn))]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with exit code {code:?}\n{stderr}")]
    #[diagnostic(code(srcdist::process::failed))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("tracked file is missing from the working tree: {}", path.display())]
    #[diagnostic(
        code(srcdist::fs::missing_tracked_file),
        help("the working tree is inconsistent with the index; restore or commit the deletion")
    )]
    MissingTrackedFile { path: PathBuf },

    #[error("build reported success but `{}` does not exist", path.display())]
    #[diagnostic(code(srcdist::fs::missing_artifact))]
    MissingArtifact { path: PathBuf },

    #[error("fetched sources for `{name}` not found at {}", path.display())]
    #[diagnostic(
        code(srcdist::fs::missing_dependency),
        help("the configure step should have fetched every vendored dependency")
    )]
    MissingDependencySource { name: String, path: PathBuf },

    #[error("failed to create archive {}", path.display())]
    #[diagnostic(code(srcdist::archive::write))]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid dependency catalog")]
    #[diagnostic(code(srcdist::config::catalog))]
    Catalog(#[from] toml::de::Error),

    #[error("dependency `{name}` is listed more than once in the catalog")]
    #[diagnostic(code(srcdist::config::duplicate_dependency))]
    DuplicateDependency { name: String },
}
