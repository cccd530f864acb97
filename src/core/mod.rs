//! Core data structures for source distributions.
//!
//! - Version (prefix + short revision)
//! - Dependency catalog and vendoring policies
//! - Vendoring mode and staging-tree naming

pub mod catalog;
pub mod layout;
pub mod version;

pub use catalog::{Catalog, DependencyDescriptor, VendorPolicy};
pub use layout::{StagingLayout, VendoringMode, DIST_DIR_NAME};
pub use version::Version;
