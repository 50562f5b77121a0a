//! Mapping from gateway outcomes to HTTP-shaped responses.
//!
//! The HTTP layer itself lives outside this workspace. It only needs a status
//! code and a JSON body, and this module decides both deterministically from
//! a `GatewayOutcome` or a `GateError`.

use serde::Serialize;
use serde_json::{json, Value};

use cmdgate_contracts::{
    error::GateError,
    execution::{ExecutionFailure, GatewayOutcome, DENIAL_MESSAGE},
};

pub const STATUS_OK: u16 = 200;
pub const STATUS_FORBIDDEN: u16 = 403;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// A status code plus JSON body, ready to be written by any HTTP stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Value,
}

impl GatewayResponse {
    /// - `Succeeded` → 200 `{ "output": <stdout> }`
    /// - `Denied` → 403 with the denial message and the missing permissions
    /// - `Failed` → 500 with the full diagnostics
    pub fn from_outcome(outcome: &GatewayOutcome) -> Self {
        match outcome {
            GatewayOutcome::Succeeded { result, .. } => Self {
                status: STATUS_OK,
                body: json!({ "output": result.stdout }),
            },
            GatewayOutcome::Denied { missing, .. } => Self::forbidden(missing),
            GatewayOutcome::Failed { failure, .. } => Self::execution_failed(failure),
        }
    }

    pub fn from_error(err: &GateError) -> Self {
        match err {
            GateError::AuthorizationDenied { missing, .. } => Self::forbidden(missing),
            GateError::ExecutionFailed(failure) => Self::execution_failed(failure),
            GateError::CommandNotFound { .. } => Self {
                status: STATUS_NOT_FOUND,
                body: json!({ "error": err.to_string() }),
            },
            GateError::InvalidCommandLine { .. } | GateError::ConfigError { .. } => Self {
                status: STATUS_INTERNAL_ERROR,
                body: json!({ "error": err.to_string() }),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    fn forbidden(missing: &[String]) -> Self {
        Self {
            status: STATUS_FORBIDDEN,
            body: json!({ "error": DENIAL_MESSAGE, "missing": missing }),
        }
    }

    // Diagnostics are returned to the caller unredacted.
    fn execution_failed(failure: &ExecutionFailure) -> Self {
        Self {
            status: STATUS_INTERNAL_ERROR,
            body: json!({
                "error": failure.to_string(),
                "command": failure.command_line,
                "exit_code": failure.exit_code,
                "signal": failure.signal,
                "stdout": failure.stdout,
                "stderr": failure.stderr,
            }),
        }
    }
}
