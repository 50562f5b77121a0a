//! Error types for the cmdgate pipeline.
//!
//! All fallible operations return `GateResult<T>`. Variants carry enough
//! context for an operator to diagnose the failure from the message alone.

use thiserror::Error;

use crate::execution::ExecutionFailure;

/// The unified error type for cmdgate.
#[derive(Debug, Error)]
pub enum GateError {
    /// The caller's grants do not cover the command's required permissions.
    #[error("Unauthorized - Missing required permissions for command '{}': {}", .command_id, .missing.join(", "))]
    AuthorizationDenied {
        command_id: String,
        missing: Vec<String>,
    },

    /// The child process could not be started or exited unsuccessfully.
    #[error("execution failed: {0}")]
    ExecutionFailed(ExecutionFailure),

    /// No command is registered under the requested identifier.
    #[error("command '{command_id}' not found")]
    CommandNotFound { command_id: String },

    /// The stored command line cannot be turned into a program invocation.
    #[error("invalid command line '{command_line}': {reason}")]
    InvalidCommandLine { command_line: String, reason: String },

    /// A configuration source is missing or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

pub type GateResult<T> = Result<T, GateError>;
