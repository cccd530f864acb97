//! High-level operations.
//!
//! One module per pipeline stage, plus [`make_src_dist`] which runs them in
//! order.

pub mod archive;
pub mod build;
pub mod collect;
pub mod dist_config;
pub mod make_src_dist;
pub mod select;
pub mod vendor;
pub mod version;

pub use archive::create_archive;
pub use build::build_artifact;
pub use collect::collect_sources;
pub use dist_config::{render_dist_cmakelists, write_dist_cmakelists};
pub use make_src_dist::{make_src_dist, SrcDistOptions, Stage, Tools};
pub use select::{select_dependencies, Selection};
pub use vendor::{vendor_dependency, VendorStats};
pub use version::{read_version_prefix, resolve_version};
