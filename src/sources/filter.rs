//! Ignore rules for vendored dependency trees.
//!
//! Fetched dependency trees carry test suites, example programs and
//! documentation that are irrelevant to compiling the project. Some heavy
//! ones:
//!
//! - `libzt-src/ext`: 48M
//! - `asio-src/asio/src/doc`: 9.8M
//!
//! Paths handed to [`IgnoreRuleSet::decide`] are relative to the fetched
//! dependency area, so the first segment is always `<name>-src`.

use std::borrow::Cow;
use std::path::{Component, Path};

/// Directory names pruned wherever they appear.
const EXCLUDED_DIR_NAMES: &[&str] = &[
    "test", "tests", "other", "vcproj", "vcxproj", "example", "examples", "doxygen", "doc",
    "docs",
];

/// Multi-segment subtrees pruned as a whole.
const EXCLUDED_SUBTREES: &[&[&str]] = &[&["asio-src", "asio", "src"]];

/// Substrings that exclude an entry by name.
const EXCLUDED_NAME_FRAGMENTS: &[&str] =
    &["Makefile", "vcproj", "vcxproj", "example", "doxygen", "doc"];

const EXCLUDED_EXTENSIONS: &[&str] = &[".doxy", ".cmd", ".png", ".html", ".ico", ".icns"];

/// Outcome of evaluating the rules for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Exclude,
}

/// A dependency whose build breaks if the general rules are applied to it.
///
/// SDL_audiolib references every file of its tree unconditionally, so its
/// tree is copied as-is. Only the contents of its bundled fmt copy are
/// dropped; the directory itself stays.
#[derive(Debug, Clone, Copy)]
pub struct FragileDependency {
    /// Substring identifying paths that belong to the dependency.
    pub marker: &'static str,
    /// Directory whose contents are dropped, relative to the fetch area.
    pub emptied_dir: &'static str,
}

pub const SDL_AUDIOLIB: FragileDependency = FragileDependency {
    marker: "sdl_audiolib",
    emptied_dir: "sdl_audiolib-src/3rdparty/fmt",
};

impl FragileDependency {
    /// Verdict for an entry whose parent directory is `parent`, or `None`
    /// if the entry does not belong to this dependency.
    pub fn verdict(&self, parent: &Path) -> Option<Verdict> {
        if !parent.to_string_lossy().contains(self.marker) {
            return None;
        }
        if parent.ends_with(self.emptied_dir) {
            Some(Verdict::Exclude)
        } else {
            Some(Verdict::Keep)
        }
    }
}

/// Stateless set of exclusion predicates evaluated while copying a tree.
#[derive(Debug, Clone)]
pub struct IgnoreRuleSet {
    overrides: Vec<FragileDependency>,
}

impl Default for IgnoreRuleSet {
    fn default() -> Self {
        IgnoreRuleSet {
            overrides: vec![SDL_AUDIOLIB],
        }
    }
}

impl IgnoreRuleSet {
    /// A rule set without any dependency-specific override.
    pub fn without_overrides() -> Self {
        IgnoreRuleSet {
            overrides: Vec::new(),
        }
    }

    /// Decide whether the entry at `rel_path` is copied.
    ///
    /// The entry's parent is assumed to have been kept already; excluding a
    /// directory prunes everything below it.
    pub fn decide(&self, rel_path: &Path, is_dir: bool) -> Verdict {
        let parent = rel_path.parent().unwrap_or(Path::new(""));

        if let Some(verdict) = self.overrides.iter().find_map(|o| o.verdict(parent)) {
            return verdict;
        }

        if excludes_dir(parent) || (is_dir && excludes_dir(rel_path)) {
            tracing::debug!("Excluded directory {}", rel_path.display());
            return Verdict::Exclude;
        }

        let name = rel_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if excludes_entry(&name) {
            tracing::debug!("Excluded file {}", rel_path.display());
            return Verdict::Exclude;
        }

        Verdict::Keep
    }
}

fn segments(path: &Path) -> Vec<Cow<'_, str>> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect()
}

/// Directory predicate: hidden, test/doc/example-like, or a heavy subtree.
pub fn excludes_dir(path: &Path) -> bool {
    let segs = segments(path);

    if segs.iter().any(|s| {
        let s: &str = s;
        s.starts_with('.') || EXCLUDED_DIR_NAMES.contains(&s)
    }) {
        return true;
    }

    EXCLUDED_SUBTREES.iter().any(|subtree| {
        segs.windows(subtree.len())
            .any(|w| w.iter().zip(subtree.iter()).all(|(a, b)| a == b))
    })
}

/// Entry predicate, applied to the bare name of a file or directory.
pub fn excludes_entry(name: &str) -> bool {
    name.starts_with('.')
        || EXCLUDED_NAME_FRAGMENTS.iter().any(|f| name.contains(f))
        || EXCLUDED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
        || excludes_dir(Path::new(name))
}
