//! Test utilities and mocks for unit tests.
//!
//! The pipeline reaches CMake and git only through
//! [`CommandRunner`](crate::util::process::CommandRunner), so tests swap in
//! [`MockExecutor`] to return canned outputs.
//!
//! # Example
//!
//! ```rust,ignore
//! let exec = MockExecutor::new();
//! exec.expect_contains("rev-parse", MockProcessOutput::success("abc1234\n"));
//!
//! let repo = GitRepo::new(&exec, "git", "/repo");
//! assert_eq!(repo.short_revision()?, "abc1234");
//! ```

pub mod fixtures;

use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::util::process::{CommandRunner, ProcessBuilder, ProcessOutput};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: Vec<u8>,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

impl From<MockProcessOutput> for ProcessOutput {
    fn from(mock: MockProcessOutput) -> Self {
        ProcessOutput {
            code: Some(mock.status),
            stdout: mock.stdout,
            stderr: mock.stderr.into_bytes(),
        }
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Any => true,
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    pub pattern: CommandPattern,
    pub output: MockProcessOutput,
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
    default_output: Option<MockProcessOutput>,
}

/// Mock process executor for testing command execution.
///
/// Records every command it is asked to run. The first matching expectation
/// wins; unmatched commands fall back to the default output or fail.
#[derive(Debug, Default)]
pub struct MockExecutor {
    state: Mutex<MockState>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    fn push(&self, pattern: CommandPattern, output: MockProcessOutput) -> &Self {
        self.state
            .lock()
            .unwrap()
            .expectations
            .push(CommandExpectation { pattern, output });
        self
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&self, prefix: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::StartsWith(prefix.to_string()), output)
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&self, substring: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Contains(substring.to_string()), output)
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&self, output: MockProcessOutput) -> &Self {
        self.state.lock().unwrap().default_output = Some(output);
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl CommandRunner for MockExecutor {
    fn run(&self, cmd: &ProcessBuilder) -> Result<ProcessOutput> {
        let full_cmd = cmd.display_command();
        let mut state = self.state.lock().unwrap();
        state.calls.push(full_cmd.clone());

        if let Some(exp) = state
            .expectations
            .iter()
            .find(|exp| exp.pattern.matches(&full_cmd))
        {
            return Ok(exp.output.clone().into());
        }

        if let Some(ref default) = state.default_output {
            return Ok(default.clone().into());
        }

        bail!("unexpected command: {}", full_cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let exec = MockExecutor::new();
        exec.expect_contains("rev-parse", MockProcessOutput::success("abc1234"))
            .expect_prefix("git", MockProcessOutput::failure(1, "boom"));

        let out = exec
            .run(&ProcessBuilder::new("git").args(["rev-parse", "--short", "HEAD"]))
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, b"abc1234");

        let out = exec.run(&ProcessBuilder::new("git").arg("status")).unwrap();
        assert_eq!(out.code, Some(1));
    }

    #[test]
    fn test_unexpected_command_fails() {
        let exec = MockExecutor::new();
        assert!(exec.run(&ProcessBuilder::new("cmake")).is_err());
        assert_eq!(exec.calls(), vec!["cmake".to_string()]);
    }

    #[test]
    fn test_pattern_any() {
        assert!(CommandPattern::Any.matches("anything"));
        assert!(CommandPattern::Exact("a b".into()).matches("a b"));
        assert!(!CommandPattern::StartsWith("b".into()).matches("a b"));
    }
}
