//! Implementation of `make-src-dist`.
//!
//! The run is a fixed sequence of [`Stage`]s. Each stage finishes before the
//! next starts; the first failure aborts the run and is attributed to its
//! stage. Nothing is retried.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::{StagingLayout, VendoringMode};
use crate::ops::archive::create_archive;
use crate::ops::build::build_artifact;
use crate::ops::collect::collect_sources;
use crate::ops::dist_config::write_dist_cmakelists;
use crate::ops::select::select_dependencies;
use crate::ops::vendor::vendor_dependency;
use crate::ops::version::resolve_version;
use crate::sources::{GitRepo, IgnoreRuleSet};
use crate::util::config::DistConfig;
use crate::util::context::DistContext;
use crate::util::fs::{copy_file, ensure_dir, remove_dir_all_if_exists};
use crate::util::hash::sha256_file;
use crate::util::process::{find_cmake, find_git, CommandRunner};

/// One step of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveVersion,
    SelectDependencies,
    BuildArtifact,
    ResetStaging,
    CollectSources,
    StageArtifact,
    VendorDependencies,
    WriteBuildConfig,
    Archive,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 9] = [
        Stage::ResolveVersion,
        Stage::SelectDependencies,
        Stage::BuildArtifact,
        Stage::ResetStaging,
        Stage::CollectSources,
        Stage::StageArtifact,
        Stage::VendorDependencies,
        Stage::WriteBuildConfig,
        Stage::Archive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::ResolveVersion => "resolve-version",
            Stage::SelectDependencies => "select-dependencies",
            Stage::BuildArtifact => "build-artifact",
            Stage::ResetStaging => "reset-staging",
            Stage::CollectSources => "collect-sources",
            Stage::StageArtifact => "stage-artifact",
            Stage::VendorDependencies => "vendor-dependencies",
            Stage::WriteBuildConfig => "write-build-config",
            Stage::Archive => "archive",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn run_stage<T>(stage: Stage, f: impl FnOnce() -> Result<T>) -> Result<T> {
    tracing::debug!("stage {}", stage);
    f().with_context(|| format!("stage `{}` failed", stage))
}

/// External programs the pipeline drives.
#[derive(Debug, Clone)]
pub struct Tools {
    pub cmake: PathBuf,
    pub git: PathBuf,
}

impl Tools {
    /// Locate CMake and git on this machine.
    pub fn discover() -> Result<Self> {
        Ok(Tools {
            cmake: find_cmake()?,
            git: find_git()?,
        })
    }
}

/// Options for the make-src-dist command.
#[derive(Debug, Clone, Default)]
pub struct SrcDistOptions {
    pub mode: VendoringMode,
}

/// Build the source distribution and return the path of the archive.
pub fn make_src_dist(
    ctx: &DistContext,
    config: &DistConfig,
    runner: &dyn CommandRunner,
    tools: &Tools,
    opts: &SrcDistOptions,
) -> Result<PathBuf> {
    let repo = GitRepo::new(runner, &tools.git, ctx.root());
    let rules = IgnoreRuleSet::default();
    let staging_root = ctx.staging_root();

    let version = run_stage(Stage::ResolveVersion, || {
        resolve_version(ctx.version_file(), &repo)
    })?;
    let selection = run_stage(Stage::SelectDependencies, || {
        Ok(select_dependencies(config, opts.mode))
    })?;
    let layout = StagingLayout::new(&config.project.name, opts.mode, &version);
    tracing::info!("Packaging {} ({})", layout.top_level_dir_name(), opts.mode);

    let artifact = run_stage(Stage::BuildArtifact, || {
        build_artifact(ctx, config, &selection, runner, &tools.cmake)
    })?;

    run_stage(Stage::ResetStaging, || remove_dir_all_if_exists(&staging_root))?;

    let top_level_dir = layout.top_level_dir(&staging_root);
    let dist_dir = layout.dist_dir(&staging_root);

    run_stage(Stage::CollectSources, || {
        let tracked = repo.ls_files()?;
        collect_sources(ctx.root(), &tracked, &top_level_dir)
    })?;

    run_stage(Stage::StageArtifact, || {
        tracing::info!("Copying {}...", config.artifact.file);
        ensure_dir(&dist_dir)?;
        copy_file(&artifact, &dist_dir.join(&config.artifact.file))
    })?;

    run_stage(Stage::VendorDependencies, || {
        let deps_dir = ctx.deps_dir();
        for name in selection.copy_list() {
            vendor_dependency(&rules, &deps_dir, name, &dist_dir)?;
        }
        Ok(())
    })?;

    run_stage(Stage::WriteBuildConfig, || {
        write_dist_cmakelists(&dist_dir, config, &version, &selection)
    })?;

    let archive = run_stage(Stage::Archive, || {
        create_archive(&staging_root, &layout, ctx.build_dir())
    })?;

    // Checksum is informational; the archive is already complete.
    match sha256_file(&archive) {
        Ok(digest) => tracing::info!("sha256 {}", digest),
        Err(e) => tracing::warn!("could not checksum {}: {:#}", archive.display(), e),
    }

    Ok(archive)
}
