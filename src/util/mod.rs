//! Shared utilities

pub mod config;
pub mod context;
pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;

pub use config::DistConfig;
pub use context::DistContext;
pub use errors::DistError;
pub use process::{CommandRunner, ProcessBuilder, ProcessOutput, SystemRunner};
