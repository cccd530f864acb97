//! Vendoring mode and the naming of the staging tree.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::version::Version;

/// Name of the distribution subdirectory under the top-level directory.
pub const DIST_DIR_NAME: &str = "dist";

/// Which dependencies get bundled into the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VendoringMode {
    /// Bundle only what distributions cannot be expected to provide.
    #[default]
    Default,
    /// Additionally bundle dependencies normally supplied by the host.
    FullyVendored,
}

impl VendoringMode {
    pub fn from_flag(fully_vendored: bool) -> Self {
        if fully_vendored {
            VendoringMode::FullyVendored
        } else {
            VendoringMode::Default
        }
    }

    pub fn is_fully_vendored(self) -> bool {
        self == VendoringMode::FullyVendored
    }
}

impl fmt::Display for VendoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendoringMode::Default => write!(f, "default"),
            VendoringMode::FullyVendored => write!(f, "fully vendored"),
        }
    }
}

/// Names inside the staging tree.
///
/// `top_level_dir_name` is a pure function of product, mode and version
/// display string, so two runs at the same revision agree on every name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingLayout {
    top_level_dir_name: String,
}

impl StagingLayout {
    /// `<product>-src[-full]-<version>`.
    pub fn new(product: &str, mode: VendoringMode, version: &Version) -> Self {
        let mut top_level_dir_name = format!("{}-src", product);
        if mode.is_fully_vendored() {
            top_level_dir_name.push_str("-full");
        }
        top_level_dir_name.push('-');
        top_level_dir_name.push_str(version.display());

        StagingLayout { top_level_dir_name }
    }

    pub fn top_level_dir_name(&self) -> &str {
        &self.top_level_dir_name
    }

    /// Top-level directory below the staging root.
    pub fn top_level_dir(&self, staging_root: &Path) -> PathBuf {
        staging_root.join(&self.top_level_dir_name)
    }

    /// `dist` directory below the staging root.
    pub fn dist_dir(&self, staging_root: &Path) -> PathBuf {
        self.top_level_dir(staging_root).join(DIST_DIR_NAME)
    }

    /// File name of the compressed archive.
    pub fn archive_file_name(&self) -> String {
        format!("{}.tar.xz", self.top_level_dir_name)
    }
}
