//! Host subprocess runner.
//!
//! `ProcessRunner` turns an `Invocation` into exactly one child process,
//! blocks until it exits, and reports what it wrote. No shell is involved:
//! the program and arguments go straight to the OS. There is no timeout and
//! no retry.

use std::process::{Command as ProcessCommand, ExitStatus, Stdio};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};

use cmdgate_contracts::{
    command::Invocation,
    error::{GateError, GateResult},
    execution::{ExecutionFailure, ExecutionResult, FailureKind},
};
use cmdgate_core::traits::CommandRunner;

/// Runs invocations as direct children of the current process.
///
/// The child inherits the gateway's environment and working directory unless
/// `working_dir` is set. Its stdin is closed.
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner {
    working_dir: Option<std::path::PathBuf>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every child in `dir` instead of the gateway's own directory.
    pub fn with_working_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> GateResult<ExecutionResult> {
        let (program, args) = invocation.argv()?;
        let command_line = invocation.to_string();

        let mut cmd = ProcessCommand::new(&program);
        cmd.args(&args).stdin(Stdio::null());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(program = %program, args = ?args, "spawning child process");

        let started_at = Utc::now();
        let clock = Instant::now();

        // output() waits for the child and closes its pipes on every path.
        let output = cmd.output().map_err(|e| {
            warn!(command_line = %command_line, error = %e, "failed to start child process");
            GateError::ExecutionFailed(ExecutionFailure {
                kind: FailureKind::SpawnFailed,
                command_line: command_line.clone(),
                exit_code: None,
                signal: None,
                stdout: String::new(),
                stderr: e.to_string(),
            })
        })?;

        let duration_ms = clock.elapsed().as_millis() as u64;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code();
        let signal = termination_signal(&output.status);

        if !output.status.success() {
            warn!(
                command_line = %command_line,
                status = %output.status,
                signal = ?signal,
                "child process exited unsuccessfully"
            );
            return Err(GateError::ExecutionFailed(ExecutionFailure {
                kind: FailureKind::NonZeroExit,
                command_line,
                exit_code,
                signal,
                stdout,
                stderr,
            }));
        }

        debug!(
            command_line = %command_line,
            duration_ms,
            stdout_bytes = output.stdout.len(),
            "child process exited successfully"
        );

        Ok(ExecutionResult {
            stdout,
            stderr,
            exit_code,
            started_at,
            duration_ms,
        })
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
