//! Copying fetched dependency trees into `dist/`, minus the bloat.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use crate::sources::filter::{IgnoreRuleSet, Verdict};
use crate::util::errors::DistError;
use crate::util::fs::{copy_file, ensure_dir};

/// Counts for one copied dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorStats {
    pub files: usize,
    pub excluded: usize,
}

/// Copy `<deps_dir>/<name>-src` to `<dist_dir>/<name>-src`, applying `rules`.
///
/// Every entry is judged by its path before anything is resolved, so an
/// excluded entry is never touched. Kept symlinks are dereferenced. Excluded
/// directories are not descended into. Entries are visited in file-name
/// order.
pub fn vendor_dependency(
    rules: &IgnoreRuleSet,
    deps_dir: &Path,
    name: &str,
    dist_dir: &Path,
) -> Result<VendorStats> {
    let dir_name = format!("{}-src", name);
    let src_root = deps_dir.join(&dir_name);
    let dst_root = dist_dir.join(&dir_name);

    if !src_root.is_dir() {
        return Err(DistError::MissingDependencySource {
            name: name.to_string(),
            path: src_root,
        }
        .into());
    }

    tracing::info!("Copying {}...", name);

    let mut stats = VendorStats::default();
    copy_tree(rules, deps_dir, &src_root, &dst_root, &mut stats)?;

    tracing::debug!(
        "{}: {} files copied, {} entries excluded",
        name,
        stats.files,
        stats.excluded
    );
    Ok(stats)
}

/// Copy the kept part of `src_dir` into `dst_dir`. `src_dir` may itself be a
/// kept symlink to a directory.
fn copy_tree(
    rules: &IgnoreRuleSet,
    deps_dir: &Path,
    src_dir: &Path,
    dst_dir: &Path,
    stats: &mut VendorStats,
) -> Result<()> {
    let mut excluded = 0;
    let walker = WalkDir::new(src_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let Ok(rel) = entry.path().strip_prefix(deps_dir) else {
                return false;
            };
            match rules.decide(rel, entry.file_type().is_dir()) {
                Verdict::Keep => true,
                Verdict::Exclude => {
                    excluded += 1;
                    false
                }
            }
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", src_dir.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src_dir)
            .with_context(|| format!("unexpected path {}", entry.path().display()))?;
        let dst = dst_dir.join(rel);

        if entry.file_type().is_dir() {
            ensure_dir(&dst)?;
        } else if entry.path_is_symlink() && entry.depth() > 0 {
            copy_link_target(rules, deps_dir, entry.path(), &dst, stats)?;
        } else {
            copy_file(entry.path(), &dst)?;
            stats.files += 1;
        }
    }

    stats.excluded += excluded;
    Ok(())
}

/// Copy what a kept symlink points at.
fn copy_link_target(
    rules: &IgnoreRuleSet,
    deps_dir: &Path,
    link: &Path,
    dst: &Path,
    stats: &mut VendorStats,
) -> Result<()> {
    let meta = fs::metadata(link)
        .with_context(|| format!("failed to resolve symlink {}", link.display()))?;

    if !meta.is_dir() {
        copy_file(link, dst)?;
        stats.files += 1;
        return Ok(());
    }

    let target = fs::canonicalize(link)
        .with_context(|| format!("failed to resolve symlink {}", link.display()))?;
    if let Some(parent) = link.parent() {
        let parent = fs::canonicalize(parent)
            .with_context(|| format!("failed to resolve {}", parent.display()))?;
        if parent.starts_with(&target) {
            bail!("symlink loop at {}", link.display());
        }
    }

    copy_tree(rules, deps_dir, link, dst, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RepoFixture;
    use tempfile::TempDir;

    fn vendor(repo: &RepoFixture, name: &str) -> (TempDir, VendorStats) {
        let dist = TempDir::new().unwrap();
        let stats = vendor_dependency(
            &IgnoreRuleSet::default(),
            &repo.build_dir().join("_deps"),
            name,
            dist.path(),
        )
        .unwrap();
        (dist, stats)
    }

    #[test]
    fn test_vendor_strips_bloat() {
        let repo = RepoFixture::new("1.2.3");
        repo.add_fetched_dependency("libmpq");

        let (dist, stats) = vendor(&repo, "libmpq");
        let dep = dist.path().join("libmpq-src");

        assert!(dep.join("CMakeLists.txt").is_file());
        assert!(dep.join("src/libmpq.c").is_file());
        assert!(dep.join("include/libmpq.h").is_file());

        assert!(!dep.join("tests").exists());
        assert!(!dep.join("docs").exists());
        assert!(!dep.join(".git").exists());
        assert!(!dep.join(".gitignore").exists());
        assert!(!dep.join("logo.png").exists());
        assert!(!dep.join("Makefile").exists());

        assert_eq!(stats.files, 3);
        assert_eq!(stats.excluded, 6);
    }

    #[test]
    fn test_vendor_prunes_asio_sources() {
        let repo = RepoFixture::new("1.2.3");
        repo.add_fetched_dependency("asio");

        let (dist, _) = vendor(&repo, "asio");
        let dep = dist.path().join("asio-src");

        assert!(dep.join("asio/include/asio.hpp").is_file());
        assert!(!dep.join("asio/src").exists());
    }

    #[test]
    fn test_vendor_keeps_fragile_dependency_intact() {
        let repo = RepoFixture::new("1.2.3");
        repo.add_fetched_dependency("sdl_audiolib");

        let (dist, _) = vendor(&repo, "sdl_audiolib");
        let dep = dist.path().join("sdl_audiolib-src");

        assert!(dep.join("doc/CMakeLists.txt").is_file());
        assert!(dep.join("tests/test_dep.c").is_file());
        assert!(dep.join("Makefile").is_file());

        assert!(dep.join("3rdparty/fmt").is_dir());
        assert!(!dep.join("3rdparty/fmt/format.h").exists());
    }

    #[test]
    fn test_missing_dependency_source_is_fatal() {
        let repo = RepoFixture::new("1.2.3");
        let dist = TempDir::new().unwrap();

        let err = vendor_dependency(
            &IgnoreRuleSet::default(),
            &repo.build_dir().join("_deps"),
            "libzt",
            dist.path(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DistError>(),
            Some(DistError::MissingDependencySource { .. })
        ));
    }

    /// A bare `libzt-src` tree under `<tmp>/_deps` with a build file.
    #[cfg(unix)]
    fn bare_dependency(tmp: &TempDir) -> std::path::PathBuf {
        let deps = tmp.path().join("_deps");
        std::fs::create_dir_all(deps.join("libzt-src")).unwrap();
        std::fs::write(deps.join("libzt-src/CMakeLists.txt"), "project(zt)\n").unwrap();
        deps
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_with_excluded_name_is_skipped() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let deps = bare_dependency(&tmp);
        symlink("does-not-exist", deps.join("libzt-src/.clang-format")).unwrap();
        symlink("gone.html", deps.join("libzt-src/README.html")).unwrap();
        let dist = tmp.path().join("dist");

        let stats = vendor_dependency(&IgnoreRuleSet::default(), &deps, "libzt", &dist).unwrap();

        assert_eq!(stats.files, 1);
        assert_eq!(stats.excluded, 2);
        assert!(dist.join("libzt-src/CMakeLists.txt").is_file());
        assert!(dist.join("libzt-src/.clang-format").symlink_metadata().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_with_kept_name_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let deps = bare_dependency(&tmp);
        std::os::unix::fs::symlink("nowhere.c", deps.join("libzt-src/zt.c")).unwrap();

        let err = vendor_dependency(
            &IgnoreRuleSet::default(),
            &deps,
            "libzt",
            &tmp.path().join("dist"),
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("failed to resolve symlink"));
    }

    #[cfg(unix)]
    #[test]
    fn test_linked_directory_is_copied_and_filtered() {
        let tmp = TempDir::new().unwrap();
        let deps = bare_dependency(&tmp);
        let real = deps.join("libzt-src/real");
        std::fs::create_dir_all(real.join("tests")).unwrap();
        std::fs::write(real.join("zt.h"), "int zt(void);\n").unwrap();
        std::fs::write(real.join("tests/zt_test.c"), "int t;\n").unwrap();
        std::os::unix::fs::symlink("real", deps.join("libzt-src/alias")).unwrap();
        let dist = tmp.path().join("dist");

        vendor_dependency(&IgnoreRuleSet::default(), &deps, "libzt", &dist).unwrap();

        let alias = dist.join("libzt-src/alias");
        assert!(!alias.symlink_metadata().unwrap().file_type().is_symlink());
        assert!(alias.join("zt.h").is_file());
        assert!(!alias.join("tests").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let deps = bare_dependency(&tmp);
        std::os::unix::fs::symlink(".", deps.join("libzt-src/again")).unwrap();

        let err = vendor_dependency(
            &IgnoreRuleSet::default(),
            &deps,
            "libzt",
            &tmp.path().join("dist"),
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("symlink loop"));
    }
}
