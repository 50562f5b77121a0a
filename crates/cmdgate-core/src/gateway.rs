//! The gateway: authorize, then execute.
//!
//! The gateway enforces one ordering on every request:
//!
//!   Command + CallerGrantSet → PermissionPolicy → [CommandRunner::run] → Outcome
//!
//! `CommandRunner::run()` is only reachable after the policy returns
//! `Authorization::Authorized`. A denial therefore never creates a process.

use tracing::{debug, info, warn};

use cmdgate_contracts::{
    command::Command,
    error::{GateError, GateResult},
    execution::{Authorization, ExecutionResult, GatewayOutcome, InvocationId},
    grants::CallerGrantSet,
};

use crate::traits::{CommandRunner, PermissionPolicy};

/// Stateless front door for command execution.
///
/// One gateway can serve any number of concurrent requests. It holds no
/// mutable state; every `invoke()` is independent of every other.
pub struct Gateway {
    policy: Box<dyn PermissionPolicy>,
    runner: Box<dyn CommandRunner>,
}

impl Gateway {
    pub fn new(policy: Box<dyn PermissionPolicy>, runner: Box<dyn CommandRunner>) -> Self {
        Self { policy, runner }
    }

    /// Check `grants` against `command` without running anything.
    ///
    /// Returns `GateError::AuthorizationDenied` listing the missing
    /// permissions when the caller falls short.
    pub fn authorize(&self, command: &Command, grants: &CallerGrantSet) -> GateResult<()> {
        match self.policy.authorize(command, grants) {
            Authorization::Authorized => Ok(()),
            Authorization::Denied { missing, .. } => Err(GateError::AuthorizationDenied {
                command_id: command.id.0.clone(),
                missing,
            }),
        }
    }

    /// Run `command` with no permission check.
    ///
    /// Callers must have authorized the request first; `invoke()` does both.
    pub fn execute(&self, command: &Command) -> GateResult<ExecutionResult> {
        self.runner.run(&command.invocation)
    }

    /// Handle one request end to end.
    ///
    /// # Pipeline
    ///
    /// 1. Ask the policy whether `grants` cover `command`'s requirements
    ///    - `Denied` → return `GatewayOutcome::Denied`; nothing is spawned
    /// 2. Run the command's invocation through the runner
    ///    - success → `GatewayOutcome::Succeeded`
    ///    - `ExecutionFailed` → `GatewayOutcome::Failed` with diagnostics
    ///
    /// # Errors
    ///
    /// Only errors that are not execution failures (for example an empty
    /// command line) are returned as `Err`. Denials and failed runs are
    /// ordinary outcomes.
    pub fn invoke(&self, command: &Command, grants: &CallerGrantSet) -> GateResult<GatewayOutcome> {
        let invocation_id = InvocationId::new();

        debug!(
            invocation_id = %invocation_id,
            command_id = %command.id,
            required = command.required_permissions.len(),
            granted = grants.len(),
            "gateway invocation starting"
        );

        // ── Step 1: Authorization ───────────────────────────────────────────
        if let Authorization::Denied { reason, missing } = self.policy.authorize(command, grants) {
            warn!(
                invocation_id = %invocation_id,
                command_id = %command.id,
                missing = %missing.join(","),
                "caller lacks required permissions"
            );
            return Ok(GatewayOutcome::Denied {
                invocation_id,
                command_id: command.id.clone(),
                reason,
                missing,
            });
        }

        // ── Step 2: Execution ───────────────────────────────────────────────
        //
        // Only reachable after Authorized. This is the only call site for
        // runner.run() on the request path.
        debug!(
            invocation_id = %invocation_id,
            command_id = %command.id,
            command_line = %command.invocation,
            "authorized, running command"
        );

        match self.runner.run(&command.invocation) {
            Ok(result) => {
                info!(
                    invocation_id = %invocation_id,
                    command_id = %command.id,
                    duration_ms = result.duration_ms,
                    "command succeeded"
                );
                Ok(GatewayOutcome::Succeeded {
                    invocation_id,
                    command_id: command.id.clone(),
                    result,
                })
            }
            Err(GateError::ExecutionFailed(failure)) => {
                warn!(
                    invocation_id = %invocation_id,
                    command_id = %command.id,
                    exit_code = ?failure.exit_code,
                    "command failed"
                );
                Ok(GatewayOutcome::Failed {
                    invocation_id,
                    command_id: command.id.clone(),
                    failure,
                })
            }
            Err(other) => Err(other),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
