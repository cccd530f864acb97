//! Build-system adapters.
//!
//! The project's own build is opaque: the pipeline only issues configure
//! and build commands and observes whether they succeed.

pub mod cmake;

pub use cmake::CMakeBuilder;
