//! Authorization decisions and execution outcomes.
//!
//! `Authorization` is what the permission check returns. `ExecutionResult`
//! and `ExecutionFailure` describe one child process run. `GatewayOutcome`
//! combines the two into the single value the boundary layer maps to a
//! response.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::command::CommandId;

/// User-facing message for a denied request.
pub const DENIAL_MESSAGE: &str = "Unauthorized - Missing required permissions";

/// Unique identifier for one gateway invocation. Appears in every log line
/// emitted while handling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(pub uuid::Uuid);

impl InvocationId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The result of checking a caller's grants against a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authorization {
    Authorized,
    Denied {
        /// Always `DENIAL_MESSAGE`.
        reason: String,
        /// Required permissions the caller lacks, sorted by name.
        missing: Vec<String>,
    },
}

impl Authorization {
    pub fn denied(missing: Vec<String>) -> Self {
        Authorization::Denied {
            reason: DENIAL_MESSAGE.to_string(),
            missing,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Authorization::Authorized)
    }
}

/// A child process that exited successfully.
///
/// Only successful runs produce one of these; failures are reported as
/// `ExecutionFailure`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Everything the process wrote to stdout, decoded lossily as UTF-8.
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// Why a run did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The OS refused to start the program (not found, not executable, ...).
    SpawnFailed,
    /// The program ran and exited with a non-success status.
    NonZeroExit,
}

/// Diagnostics for a run that failed to start or exited unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionFailure {
    pub kind: FailureKind,
    /// The command line that was attempted.
    pub command_line: String,
    /// `None` if the process never started or was killed by a signal.
    pub exit_code: Option<i32>,
    /// The signal that terminated the process, if any. Unix only.
    #[serde(default)]
    pub signal: Option<i32>,
    pub stdout: String,
    /// Captured stderr, or the OS error text when the spawn failed.
    pub stderr: String,
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::SpawnFailed => write!(
                f,
                "command '{}' could not be started: {}",
                self.command_line,
                self.stderr.trim()
            ),
            FailureKind::NonZeroExit => {
                write!(f, "command '{}' ", self.command_line)?;
                match (self.exit_code, self.signal) {
                    (Some(code), _) => write!(f, "failed with exit code {}", code)?,
                    (None, Some(signal)) => write!(f, "terminated by signal {}", signal)?,
                    (None, None) => f.write_str("failed with unknown status")?,
                }
                write!(f, ": {}", self.stderr.trim())
            }
        }
    }
}

/// Everything one gateway invocation can end in.
///
/// Callers pattern-match on this to choose a response:
/// - `Succeeded` → return the captured stdout
/// - `Failed` → server error carrying the diagnostics
/// - `Denied` → explicit denial; no process was started
#[derive(Debug, Clone)]
pub enum GatewayOutcome {
    Succeeded {
        invocation_id: InvocationId,
        command_id: CommandId,
        result: ExecutionResult,
    },
    Failed {
        invocation_id: InvocationId,
        command_id: CommandId,
        failure: ExecutionFailure,
    },
    Denied {
        invocation_id: InvocationId,
        command_id: CommandId,
        reason: String,
        missing: Vec<String>,
    },
}

impl GatewayOutcome {
    pub fn invocation_id(&self) -> InvocationId {
        match self {
            GatewayOutcome::Succeeded { invocation_id, .. }
            | GatewayOutcome::Failed { invocation_id, .. }
            | GatewayOutcome::Denied { invocation_id, .. } => *invocation_id,
        }
    }

    pub fn command_id(&self) -> &CommandId {
        match self {
            GatewayOutcome::Succeeded { command_id, .. }
            | GatewayOutcome::Failed { command_id, .. }
            | GatewayOutcome::Denied { command_id, .. } => command_id,
        }
    }
}
