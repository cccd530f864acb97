//! Where distribution contents come from: the git checkout and the
//! dependency trees fetched by the configure step.

pub mod filter;
pub mod git;

pub use filter::{IgnoreRuleSet, Verdict};
pub use git::GitRepo;
