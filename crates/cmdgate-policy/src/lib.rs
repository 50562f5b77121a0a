//! # cmdgate-policy
//!
//! Permission checking and command lookup for cmdgate.
//!
//! ## Overview
//!
//! This crate provides [`RequiredPermissionsPolicy`], which implements the
//! [`PermissionPolicy`](cmdgate_core::traits::PermissionPolicy) trait with
//! all-of semantics, and [`CommandRegistry`], which loads command records
//! from TOML.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use cmdgate_policy::{CommandRegistry, RequiredPermissionsPolicy};
//!
//! let registry = CommandRegistry::from_file(Path::new("commands.toml"))?;
//! let command = registry.get("uptime")?;
//! // Pass `RequiredPermissionsPolicy` to `cmdgate_core::Gateway::new(...)`.
//! ```

pub mod permission;
pub mod registry;

pub use permission::{authorize, RequiredPermissionsPolicy};
pub use registry::{CommandRegistry, RegistryConfig};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use cmdgate_contracts::{
        command::{Command, Invocation},
        error::GateError,
        execution::{Authorization, DENIAL_MESSAGE},
        grants::CallerGrantSet,
    };
    use cmdgate_core::traits::PermissionPolicy;

    use crate::{authorize, CommandRegistry, RequiredPermissionsPolicy};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn command(required: &[&str]) -> Command {
        required
            .iter()
            .fold(Command::new("cmd", "true"), |c, p| c.require(*p))
    }

    fn grants(names: &[&str]) -> CallerGrantSet {
        names.iter().copied().collect()
    }

    fn missing(decision: Authorization) -> Vec<String> {
        match decision {
            Authorization::Denied { missing, .. } => missing,
            Authorization::Authorized => panic!("expected Denied, got Authorized"),
        }
    }

    // ── 1. subset semantics ───────────────────────────────────────────────────

    #[test]
    fn test_extra_grants_are_harmless() {
        let decision = authorize(&command(&["read", "write"]), &grants(&["read", "write", "admin"]));
        assert_eq!(decision, Authorization::Authorized);
    }

    #[test]
    fn test_partial_coverage_is_denied() {
        let decision = authorize(&command(&["read", "write"]), &grants(&["read"]));
        assert_eq!(missing(decision), vec!["write"]);
    }

    #[test]
    fn test_empty_grants_denied_for_any_requirement() {
        let decision = authorize(&command(&["deploy"]), &CallerGrantSet::empty());
        match decision {
            Authorization::Denied { reason, missing } => {
                assert_eq!(reason, DENIAL_MESSAGE);
                assert_eq!(missing, vec!["deploy"]);
            }
            other => panic!("expected Denied, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_abilities_behave_as_empty() {
        let absent = CallerGrantSet::from(None::<Vec<String>>);
        assert!(!authorize(&command(&["deploy"]), &absent).is_authorized());
        assert!(authorize(&command(&[]), &absent).is_authorized());
    }

    #[test]
    fn test_open_command_authorized_for_everyone() {
        let open = command(&[]);
        assert!(authorize(&open, &CallerGrantSet::empty()).is_authorized());
        assert!(authorize(&open, &grants(&["anything"])).is_authorized());
    }

    #[test]
    fn test_missing_list_is_sorted_and_complete() {
        let decision = authorize(&command(&["zeta", "alpha", "mid"]), &grants(&["mid"]));
        assert_eq!(missing(decision), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_names_compare_exactly() {
        let decision = authorize(&command(&["Deploy"]), &grants(&["deploy"]));
        assert!(!decision.is_authorized());
    }

    /// Authorized iff required ⊆ granted, checked over every grant subset of
    /// a small universe. Also checks monotonicity: adding grants never turns
    /// Authorized into Denied.
    #[test]
    fn test_subset_property_over_small_universe() {
        let universe = ["a", "b", "c", "d"];
        let required = command(&["a", "c"]);

        for mask in 0u32..(1 << universe.len()) {
            let held: Vec<&str> = universe
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, n)| *n)
                .collect();
            let expected = held.contains(&"a") && held.contains(&"c");
            let decision = authorize(&required, &grants(&held));
            assert_eq!(decision.is_authorized(), expected, "held = {:?}", held);

            if expected {
                for extra in universe {
                    let mut bigger = held.clone();
                    bigger.push(extra);
                    assert!(authorize(&required, &grants(&bigger)).is_authorized());
                }
            }
        }
    }

    #[test]
    fn test_policy_trait_delegates_to_authorize() {
        let policy = RequiredPermissionsPolicy::new();
        let cmd = command(&["read"]);
        assert!(policy.authorize(&cmd, &grants(&["read"])).is_authorized());
        assert!(!policy.authorize(&cmd, &grants(&["write"])).is_authorized());
    }

    // ── 2. registry loading ───────────────────────────────────────────────────

    const REGISTRY: &str = r#"
        [[commands]]
        id = "uptime"
        name = "Uptime"
        description = "Show host uptime"
        command = "uptime -p"
        permissions = ["host:read"]

        [[commands]]
        id = "git-log"
        command = { program = "git", args = ["log", "--oneline"] }
        permissions = ["repo:read", "repo:read"]

        [[commands]]
        id = "hello"
        command = "echo hello"
    "#;

    #[test]
    fn test_registry_loads_all_commands() {
        let registry = CommandRegistry::from_toml_str(REGISTRY).unwrap();
        assert_eq!(registry.len(), 3);

        let ids: Vec<&str> = registry.list().map(|c| c.id.0.as_str()).collect();
        assert_eq!(ids, vec!["git-log", "hello", "uptime"]);

        let uptime = registry.get("uptime").unwrap();
        assert_eq!(uptime.name, "Uptime");
        assert_eq!(uptime.invocation, Invocation::Line("uptime -p".to_string()));

        assert!(registry.get("hello").unwrap().required_permissions.is_empty());
    }

    #[test]
    fn test_registry_collapses_duplicate_permissions() {
        let registry = CommandRegistry::from_toml_str(REGISTRY).unwrap();
        let git = registry.get("git-log").unwrap();
        assert_eq!(git.required_permissions.len(), 1);
        assert!(matches!(git.invocation, Invocation::Argv { .. }));
    }

    #[test]
    fn test_registry_unknown_id() {
        let registry = CommandRegistry::from_toml_str(REGISTRY).unwrap();
        match registry.get("reboot") {
            Err(GateError::CommandNotFound { command_id }) => assert_eq!(command_id, "reboot"),
            other => panic!("expected CommandNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_rejects_duplicate_ids() {
        let toml = r#"
            [[commands]]
            id = "a"
            command = "true"

            [[commands]]
            id = "a"
            command = "false"
        "#;
        match CommandRegistry::from_toml_str(toml) {
            Err(GateError::ConfigError { reason }) => assert!(reason.contains("duplicate")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_rejects_blank_command_line() {
        let toml = r#"
            [[commands]]
            id = "blank"
            command = "   "
        "#;
        assert!(matches!(
            CommandRegistry::from_toml_str(toml),
            Err(GateError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_registry_rejects_malformed_toml() {
        assert!(matches!(
            CommandRegistry::from_toml_str("[[commands]\nid ="),
            Err(GateError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(REGISTRY.as_bytes()).unwrap();

        let registry = CommandRegistry::from_file(file.path()).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_registry_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CommandRegistry::from_file(&dir.path().join("absent.toml"));
        match result {
            Err(GateError::ConfigError { reason }) => assert!(reason.contains("failed to read")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
