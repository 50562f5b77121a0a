//! Core trait definitions for the cmdgate pipeline.
//!
//! Two traits define the trust boundary:
//!
//! - `PermissionPolicy` — pure gate (decides before anything runs)
//! - `CommandRunner`    — side-effecting sink (owns the OS process layer)
//!
//! The gateway wires them together in that order. A `CommandRunner` is never
//! called unless the policy first returns `Authorization::Authorized`.

use cmdgate_contracts::{
    command::{Command, Invocation},
    error::GateResult,
    execution::{Authorization, ExecutionResult},
    grants::CallerGrantSet,
};

/// Decides whether a caller may run a command.
///
/// Implementations must be pure and deterministic: no I/O, no shared mutable
/// state, the same inputs always give the same answer.
pub trait PermissionPolicy: Send + Sync {
    fn authorize(&self, command: &Command, grants: &CallerGrantSet) -> Authorization;
}

/// Runs one invocation as a child process and waits for it.
///
/// Each call is one independent attempt. Implementations must not retry,
/// queue, or keep any state between calls, and must reap the child on every
/// path.
pub trait CommandRunner: Send + Sync {
    /// Run `invocation` to completion.
    ///
    /// Returns `GateError::ExecutionFailed` when the process cannot be started
    /// or exits unsuccessfully, and `GateError::InvalidCommandLine` when there
    /// is nothing to run.
    fn run(&self, invocation: &Invocation) -> GateResult<ExecutionResult>;
}
