//! srcdist - source-distribution archives for devilutionx
//!
//! This crate builds a self-contained `.tar.xz` of the repository: the
//! tracked sources, a pre-built game-data artifact, trimmed copies of the
//! third-party dependencies fetched by CMake, and a generated build
//! configuration that points the project at those copies.

pub mod builder;
pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// Only compiled for tests. Provides a mock command runner and an on-disk
/// repository fixture.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{StagingLayout, Version, VendoringMode};
pub use ops::{make_src_dist, SrcDistOptions, Tools};
pub use util::config::DistConfig;
pub use util::context::DistContext;
pub use util::errors::DistError;
