//! make-src-dist - package devilutionx as a source tarball

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use srcdist::util::process::SystemRunner;
use srcdist::{make_src_dist, DistConfig, DistContext, SrcDistOptions, Tools};

mod cli;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("srcdist=debug,make_src_dist=debug")
        } else {
            EnvFilter::new("srcdist=info,make_src_dist=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = DistConfig::builtin()?;
    let ctx = DistContext::discover(&config)?;
    let tools = Tools::discover()?;
    let opts = SrcDistOptions { mode: cli.mode() };

    let archive = make_src_dist(&ctx, &config, &SystemRunner, &tools, &opts)?;

    println!("{}", archive.display());
    Ok(())
}
