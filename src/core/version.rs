//! Display version of a source distribution.

use std::fmt;

/// Separator marking a pre-release style prefix (e.g. `1.2.3-beta`).
const SEPARATOR: char = '-';

/// Version of the distributed sources.
///
/// Release prefixes (`1.2.3`) are used verbatim. Prefixes that already carry
/// a separator (`1.2.3-dev`) identify a moving development line, so the short
/// revision is appended to tell snapshots apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    prefix: String,
    revision: String,
    display: String,
}

impl Version {
    /// Create a version from the version-file prefix and a short revision.
    ///
    /// An empty revision never fails: the display string is then the prefix.
    pub fn new(prefix: impl Into<String>, revision: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let revision = revision.into();

        let display = if prefix.contains(SEPARATOR) && !revision.is_empty() {
            format!("{}{}{}", prefix, SEPARATOR, revision)
        } else {
            prefix.clone()
        };

        Version {
            prefix,
            revision,
            display,
        }
    }

    /// Version prefix as read from the version file.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Short revision identifier, empty if unavailable.
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Whether a revision identifier is known.
    pub fn has_revision(&self) -> bool {
        !self.revision.is_empty()
    }

    /// Display string used in archive names.
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}
