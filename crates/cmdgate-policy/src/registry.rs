//! TOML-backed command registry.
//!
//! Stands in for the external store of command and permission records. The
//! gateway itself never looks commands up; whoever resolves the request id
//! does, and hands the resulting `Command` to the gateway.
//!
//! Example:
//! ```toml
//! [[commands]]
//! id = "uptime"
//! name = "Uptime"
//! description = "Show how long the host has been up"
//! command = "uptime -p"
//! permissions = ["host:read"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use cmdgate_contracts::{
    command::{Command, CommandId},
    error::{GateError, GateResult},
};

/// The top-level structure deserialized from a registry file.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub commands: Vec<Command>,
}

/// Commands keyed by id. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<CommandId, Command>,
}

impl CommandRegistry {
    /// Build a registry from already-constructed commands.
    ///
    /// Returns `GateError::ConfigError` if two commands share an id or a
    /// command has nothing to run.
    pub fn from_commands(commands: impl IntoIterator<Item = Command>) -> GateResult<Self> {
        let mut map = BTreeMap::new();
        for command in commands {
            command.invocation.argv().map_err(|e| GateError::ConfigError {
                reason: format!("command '{}': {}", command.id, e),
            })?;
            if map.contains_key(&command.id) {
                return Err(GateError::ConfigError {
                    reason: format!("duplicate command id '{}'", command.id),
                });
            }
            debug!(
                command_id = %command.id,
                permissions = command.required_permissions.len(),
                "registered command"
            );
            map.insert(command.id.clone(), command);
        }
        Ok(Self { commands: map })
    }

    /// Parse `s` as TOML and build a registry.
    pub fn from_toml_str(s: &str) -> GateResult<Self> {
        let config: RegistryConfig = toml::from_str(s).map_err(|e| GateError::ConfigError {
            reason: format!("failed to parse command registry TOML: {}", e),
        })?;
        Self::from_commands(config.commands)
    }

    /// Read the file at `path` and parse it as a registry.
    pub fn from_file(path: &Path) -> GateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GateError::ConfigError {
            reason: format!("failed to read command registry '{}': {}", path.display(), e),
        })?;
        let registry = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            commands = registry.len(),
            "command registry loaded"
        );
        Ok(registry)
    }

    /// Resolve `id` to its command record.
    pub fn get(&self, id: &str) -> GateResult<&Command> {
        self.commands
            .get(&CommandId::new(id))
            .ok_or_else(|| GateError::CommandNotFound {
                command_id: id.to_string(),
            })
    }

    /// All commands, ordered by id.
    pub fn list(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
