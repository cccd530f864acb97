//! Subprocess execution utilities.
//!
//! External tools (CMake, git) are only ever reached through the
//! [`CommandRunner`] trait so that the pipeline can be driven by a fake
//! runner in tests.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::Result;

use crate::util::errors::DistError;

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command and wait for completion, capturing its output.
    ///
    /// There is no timeout: a hung child blocks the caller indefinitely.
    pub fn exec(&self) -> Result<ProcessOutput, DistError> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().map_err(|source| DistError::Spawn {
            command: self.display_command(),
            source,
        })?;

        Ok(output.into())
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout decoded lossily as UTF-8.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

impl From<Output> for ProcessOutput {
    fn from(output: Output) -> Self {
        ProcessOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Narrow seam over subprocess execution.
pub trait CommandRunner {
    /// Run the command to completion and return its captured output.
    ///
    /// Implementations report spawn failures as errors; a non-zero exit is
    /// returned as a normal [`ProcessOutput`].
    fn run(&self, cmd: &ProcessBuilder) -> Result<ProcessOutput>;

    /// Run the command and require a zero exit status.
    fn run_checked(&self, cmd: &ProcessBuilder) -> Result<ProcessOutput> {
        tracing::debug!("+ {}", cmd.display_command());
        let output = self.run(cmd)?;
        if !output.success() {
            return Err(DistError::CommandFailed {
                command: cmd.display_command(),
                code: output.code,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            }
            .into());
        }
        Ok(output)
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &ProcessBuilder) -> Result<ProcessOutput> {
        Ok(cmd.exec()?)
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Locate a tool, honouring an environment variable override first.
fn find_tool(env: &str, default: &str) -> Result<PathBuf, DistError> {
    if let Ok(value) = std::env::var(env) {
        let value = value.trim();
        if !value.is_empty() {
            if let Some(path) = find_executable(value) {
                return Ok(path);
            }
        }
    }

    find_executable(default).ok_or_else(|| DistError::ToolNotFound {
        tool: default.to_string(),
        env: env.to_string(),
    })
}

/// Find CMake (`$CMAKE` overrides the lookup).
pub fn find_cmake() -> Result<PathBuf, DistError> {
    find_tool("CMAKE", "cmake")
}

/// Find git (`$GIT` overrides the lookup).
pub fn find_git() -> Result<PathBuf, DistError> {
    find_tool("GIT", "git")
}
