//! External command execution.

use crate::error::{CreateError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Stderr followed by stdout, trimmed, for error messages.
    pub fn combined_output(&self) -> String {
        let parts: Vec<&str> = [self.stderr.trim(), self.stdout.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        parts.join("\n")
    }
}

/// Runs external programs.
///
/// The resolver only ever needs one call shape: a program, its arguments,
/// and an optional working directory. Tests substitute their own runner to
/// avoid touching the network.
pub trait CommandRunner {
    /// Run `program` with `args` to completion, capturing its output.
    ///
    /// A non-zero exit is reported through [`CommandResult::success`], not as
    /// an error; `Err` means the program could not be started at all.
    fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> Result<CommandResult>;
}

/// [`CommandRunner`] backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!("Running {} {}", program, args.join(" "));

        let output = cmd.output().map_err(|e| {
            CreateError::Other(anyhow::anyhow!("Failed to start '{}': {}", program, e))
        })?;
        let duration = start.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            tracing::debug!(
                "{} exited with {:?} after {:?}",
                program,
                output.status.code(),
                duration
            );
            Ok(CommandResult::failure(
                output.status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}
