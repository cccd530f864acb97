//! On-disk fixtures: a fake repository checkout with fetched dependencies.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Build-output directory used by the builtin configuration.
pub const FIXTURE_BUILD_DIR: &str = "build-src-dist";

/// A repository checkout in a temporary directory.
///
/// Files added with [`RepoFixture::track`] are reported by
/// [`RepoFixture::ls_files_output`] the way `git ls-files -z` would.
pub struct RepoFixture {
    dir: TempDir,
    tracked: Vec<PathBuf>,
}

impl RepoFixture {
    /// Create a checkout with a `VERSION` file and a few sources.
    pub fn new(version: &str) -> Self {
        let mut fixture = RepoFixture {
            dir: TempDir::new().unwrap(),
            tracked: Vec::new(),
        };

        fixture.track("VERSION", &format!("{}\n", version));
        fixture.track("CMakeLists.txt", "cmake_minimum_required(VERSION 3.22)\n");
        fixture.track("Source/main.cpp", "int main() { return 0; }\n");
        fixture.track("assets/.gitkeep", "");
        fixture
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Build-output root.
    pub fn build_dir(&self) -> PathBuf {
        self.root().join(FIXTURE_BUILD_DIR)
    }

    /// Staging root inside the build-output root.
    pub fn staging_root(&self) -> PathBuf {
        self.build_dir().join("archive")
    }

    /// Write a file and mark it as tracked.
    pub fn track(&mut self, rel: &str, contents: &str) {
        write_file(&self.root().join(rel), contents);
        self.tracked.push(PathBuf::from(rel));
    }

    /// Mark a path as tracked without creating it on disk.
    pub fn track_missing(&mut self, rel: &str) {
        self.tracked.push(PathBuf::from(rel));
    }

    /// Create a tracked symlink.
    #[cfg(unix)]
    pub fn track_symlink(&mut self, rel: &str, target: &str) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(target, &path).unwrap();
        self.tracked.push(PathBuf::from(rel));
    }

    /// Simulated `git ls-files -z` output.
    pub fn ls_files_output(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for path in &self.tracked {
            out.extend_from_slice(path.to_string_lossy().as_bytes());
            out.push(0);
        }
        out
    }

    /// Place the binary artifact where the build step would leave it.
    pub fn add_artifact(&self) {
        write_file(&self.build_dir().join("devilutionx.mpq"), "MPQ\x1a");
    }

    /// Simulate the configure step fetching a dependency.
    ///
    /// Every tree gets build-relevant sources plus tests, docs, dotfiles and
    /// images that the ignore rules should drop.
    pub fn add_fetched_dependency(&self, name: &str) {
        let src = self.build_dir().join("_deps").join(format!("{}-src", name));

        write_file(&src.join("CMakeLists.txt"), "project(dep)\n");
        write_file(&src.join(format!("src/{}.c", name)), "int dep(void) { return 1; }\n");
        write_file(&src.join(format!("include/{}.h", name)), "int dep(void);\n");
        write_file(&src.join("tests/test_dep.c"), "int test(void);\n");
        write_file(&src.join("docs/index.html"), "<html></html>\n");
        write_file(&src.join(".git/HEAD"), "ref: refs/heads/main\n");
        write_file(&src.join(".gitignore"), "build/\n");
        write_file(&src.join("logo.png"), "PNG");
        write_file(&src.join("Makefile"), "all:\n");

        match name {
            "sdl_audiolib" => {
                write_file(&src.join("doc/CMakeLists.txt"), "# referenced by the build\n");
                write_file(&src.join("3rdparty/fmt/format.h"), "// bundled fmt\n");
            }
            "asio" => {
                write_file(&src.join("asio/include/asio.hpp"), "#pragma once\n");
                write_file(&src.join("asio/src/doc/reference.qbk"), "[section]\n");
            }
            _ => {}
        }
    }
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
