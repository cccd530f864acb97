//! Dependency selection: what gets vendored and which configure flags
//! switch off the system copies.

use crate::core::{VendorPolicy, VendoringMode};
use crate::util::config::DistConfig;

/// Result of selecting dependencies for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    mode: VendoringMode,
    copy_list: Vec<String>,
    disable_flags: Vec<String>,
    integration_flag: Option<String>,
}

impl Selection {
    pub fn mode(&self) -> VendoringMode {
        self.mode
    }

    /// Dependency names whose fetched trees are copied into `dist/`.
    ///
    /// Catalog order; in fully-vendored mode the integration dependency
    /// comes last.
    pub fn copy_list(&self) -> &[String] {
        &self.copy_list
    }

    /// One `-D<PREFIX><NAME>=OFF` per disabled system copy, sorted by name.
    pub fn disable_flags(&self) -> &[String] {
        &self.disable_flags
    }

    /// Flag enabling the integration (fully-vendored mode only).
    pub fn integration_flag(&self) -> Option<&str> {
        self.integration_flag.as_deref()
    }

    /// Everything passed to the configure step, in order.
    pub fn configure_flags(&self) -> Vec<String> {
        let mut flags = self.disable_flags.clone();
        flags.extend(self.integration_flag.clone());
        flags
    }
}

/// Compute the copy list and configure flags for `mode`.
///
/// Pure: depends only on the catalog and the mode.
pub fn select_dependencies(config: &DistConfig, mode: VendoringMode) -> Selection {
    let catalog = &config.catalog;

    let included = |policy: VendorPolicy| match policy {
        VendorPolicy::Always | VendorPolicy::DisableSystem => true,
        VendorPolicy::FullyVendoredOnly => mode.is_fully_vendored(),
    };

    let mut copy_list: Vec<String> = catalog
        .iter()
        .filter(|dep| included(dep.policy))
        .map(|dep| dep.name.clone())
        .collect();

    let mut disabled: Vec<_> = catalog
        .iter()
        .filter(|dep| !dep.always_vendored() && included(dep.policy))
        .collect();
    disabled.sort_by(|a, b| a.name.cmp(&b.name));
    let disable_flags = disabled
        .iter()
        .map(|dep| config.system_off_flag(&dep.cmake_name()))
        .collect();

    let integration_flag = if mode.is_fully_vendored() {
        // The generated config pins the integration to `dist/`, so its tree
        // has to be copied there too.
        copy_list.push(config.integration.name.clone());
        Some(config.integration_on_flag())
    } else {
        None
    };

    Selection {
        mode,
        copy_list,
        disable_flags,
        integration_flag,
    }
}
