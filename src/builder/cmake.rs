//! CMake adapter for the project's own build.

use std::path::PathBuf;

use anyhow::Result;

use crate::util::process::{CommandRunner, ProcessBuilder};

/// Configures a CMake project and builds selected targets.
///
/// Both steps block until CMake exits; a failing exit status is fatal.
pub struct CMakeBuilder<'a> {
    runner: &'a dyn CommandRunner,
    cmake: PathBuf,
    source_dir: PathBuf,
    build_dir: PathBuf,
    cmake_args: Vec<String>,
    targets: Vec<String>,
}

impl<'a> CMakeBuilder<'a> {
    /// Create a new CMake builder.
    pub fn new(
        runner: &'a dyn CommandRunner,
        cmake: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
    ) -> Self {
        CMakeBuilder {
            runner,
            cmake: cmake.into(),
            source_dir: source_dir.into(),
            build_dir: build_dir.into(),
            cmake_args: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Add CMake arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.cmake_args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    /// Specify targets to build.
    pub fn targets(mut self, targets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.targets.extend(targets.into_iter().map(|s| s.into()));
        self
    }

    /// Configure and build.
    pub fn build(&self) -> Result<()> {
        self.configure()?;
        self.compile()
    }

    /// The configure command line.
    pub fn configure_command(&self) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .cwd(&self.source_dir)
            .arg(format!("-S{}", self.source_dir.display()))
            .arg(format!("-B{}", self.build_dir.display()));

        for arg in &self.cmake_args {
            cmd = cmd.arg(arg);
        }

        cmd
    }

    /// The build command line.
    pub fn compile_command(&self) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .cwd(&self.source_dir)
            .arg("--build")
            .arg(&self.build_dir);

        if !self.targets.is_empty() {
            cmd = cmd.arg("--target");
            for target in &self.targets {
                cmd = cmd.arg(target);
            }
        }

        cmd
    }

    /// Run CMake configuration.
    fn configure(&self) -> Result<()> {
        let cmd = self.configure_command();
        tracing::info!("+ {}", cmd.display_command());
        self.runner.run_checked(&cmd)?;
        Ok(())
    }

    /// Run CMake build.
    fn compile(&self) -> Result<()> {
        let cmd = self.compile_command();
        tracing::info!("+ {}", cmd.display_command());
        self.runner.run_checked(&cmd)?;
        Ok(())
    }
}
