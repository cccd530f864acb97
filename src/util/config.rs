//! Project constants and dependency catalog.
//!
//! The defaults are compiled into the binary from `core/catalog.toml` and
//! parsed once at process start. The resulting [`DistConfig`] is immutable and
//! passed explicitly to every stage that needs it.

use std::path::PathBuf;

use serde::Deserialize;

use crate::core::Catalog;
use crate::util::errors::DistError;

const BUILTIN_CONFIG: &str = include_str!("../core/catalog.toml");

/// Complete configuration for a source-distribution run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DistConfig {
    pub project: ProjectConfig,
    pub artifact: ArtifactConfig,
    pub integration: IntegrationConfig,
    #[serde(rename = "dependency")]
    pub catalog: Catalog,
}

/// Repository-level constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    /// Product name, first component of the archive name.
    pub name: String,

    /// Version file, relative to the repository root.
    pub version_file: PathBuf,

    /// Build-output root, relative to the repository root.
    pub build_dir: PathBuf,

    /// Prefix of the cache variables that select system packages.
    pub system_flag_prefix: String,

    /// Arguments passed to every configure invocation.
    #[serde(default)]
    pub configure_args: Vec<String>,
}

/// The prebuilt binary artifact embedded in the distribution.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArtifactConfig {
    /// Build target producing the artifact.
    pub target: String,

    /// File name of the artifact inside the build directory.
    pub file: String,

    /// CMake variable the generated config points at the staged artifact.
    pub variable: String,
}

/// Optional integration enabled only in fully-vendored mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IntegrationConfig {
    /// Fetched dependency backing the integration.
    pub name: String,

    /// Configure option switching the integration on.
    pub flag: String,
}

impl DistConfig {
    /// Load the configuration compiled into the binary.
    pub fn builtin() -> Result<Self, DistError> {
        Self::parse(BUILTIN_CONFIG)
    }

    /// Parse a configuration document.
    pub fn parse(contents: &str) -> Result<Self, DistError> {
        let config: DistConfig = toml::from_str(contents)?;

        if let Some(name) = config.catalog.duplicate_name() {
            return Err(DistError::DuplicateDependency {
                name: name.to_string(),
            });
        }

        Ok(config)
    }

    /// Configure flag disabling the system copy of a dependency.
    pub fn system_off_flag(&self, cmake_name: &str) -> String {
        format!("-D{}{}=OFF", self.project.system_flag_prefix, cmake_name)
    }

    /// Cache variable selecting the system copy of a dependency.
    pub fn system_variable(&self, cmake_name: &str) -> String {
        format!("{}{}", self.project.system_flag_prefix, cmake_name)
    }

    /// Configure flag enabling the integration.
    pub fn integration_on_flag(&self) -> String {
        format!("-D{}=ON", self.integration.flag)
    }
}
