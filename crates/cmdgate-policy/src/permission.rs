//! Required-permission authorization.
//!
//! A caller may run a command iff every permission the command requires is
//! present in the caller's grant set. Extra grants are irrelevant, and so is
//! the size of either set. A command with no requirements is open to every
//! caller, including one with no grants at all.

use tracing::debug;

use cmdgate_contracts::{command::Command, execution::Authorization, grants::CallerGrantSet};
use cmdgate_core::traits::PermissionPolicy;

/// Decide whether `grants` cover everything `command` requires.
///
/// Pure and total. The `missing` list on a denial is in name order.
pub fn authorize(command: &Command, grants: &CallerGrantSet) -> Authorization {
    let missing: Vec<String> = command
        .required_permissions
        .iter()
        .filter(|required| !grants.has(required))
        .map(|required| required.0.clone())
        .collect();

    if missing.is_empty() {
        Authorization::Authorized
    } else {
        Authorization::denied(missing)
    }
}

/// The all-of policy: the `PermissionPolicy` the gateway is normally built
/// with.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequiredPermissionsPolicy;

impl RequiredPermissionsPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl PermissionPolicy for RequiredPermissionsPolicy {
    fn authorize(&self, command: &Command, grants: &CallerGrantSet) -> Authorization {
        let decision = authorize(command, grants);
        debug!(
            command_id = %command.id,
            authorized = decision.is_authorized(),
            "evaluated required permissions"
        );
        decision
    }
}
