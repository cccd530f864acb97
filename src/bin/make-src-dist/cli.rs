//! CLI definitions using clap.

use clap::Parser;

use srcdist::VendoringMode;

/// Build a source-distribution archive of devilutionx
///
/// Prints the absolute path of the archive on success. Progress goes to
/// stderr.
#[derive(Parser, Debug)]
#[command(name = "make-src-dist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Also vendor dependencies that are normally provided by the system,
    /// plus the Discord integration
    #[arg(long = "fully-vendored", alias = "fully_vendored")]
    pub fully_vendored: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn mode(&self) -> VendoringMode {
        VendoringMode::from_flag(self.fully_vendored)
    }
}
