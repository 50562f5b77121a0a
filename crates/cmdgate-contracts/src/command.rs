//! Command records and their runnable form.
//!
//! A `Command` is one whitelisted host operation. It owns the set of
//! permissions a caller must hold to run it. Records are created and edited
//! out-of-band; the gateway only ever reads them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// Stable identifier used to look a command up.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A single named permission.
///
/// The same type names both sides of the check: what a command requires and
/// what a caller credential carries. Names are compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionGrant(pub String);

impl PermissionGrant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// How a command is turned into a child process.
///
/// `Line` keeps the stored string and splits it on whitespace at run time.
/// Quoting is not understood, so an argument can never contain a space.
/// `Argv` stores the program and every argument separately and is passed to
/// the OS untouched.
///
/// In TOML either form is accepted:
/// ```toml
/// command = "uptime -p"
/// command = { program = "git", args = ["log", "--oneline", "-n", "5"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Invocation {
    Line(String),
    Argv {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl Invocation {
    /// Split into `(program, args)`.
    ///
    /// Fails with `InvalidCommandLine` when there is no program to run.
    pub fn argv(&self) -> GateResult<(String, Vec<String>)> {
        match self {
            Invocation::Line(line) => {
                let mut parts = line.split_whitespace().map(str::to_string);
                let program = parts.next().ok_or_else(|| GateError::InvalidCommandLine {
                    command_line: line.clone(),
                    reason: "command line is empty".to_string(),
                })?;
                Ok((program, parts.collect()))
            }
            Invocation::Argv { program, args } => {
                if program.trim().is_empty() {
                    return Err(GateError::InvalidCommandLine {
                        command_line: self.to_string(),
                        reason: "program is empty".to_string(),
                    });
                }
                Ok((program.clone(), args.clone()))
            }
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::Line(line) => f.write_str(line),
            Invocation::Argv { program, args } => {
                f.write_str(program)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
        }
    }
}

/// One whitelisted, host-executable operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: CommandId,
    /// Display name. Not used for authorization.
    #[serde(default)]
    pub name: String,
    /// Display text. Not used for authorization.
    #[serde(default)]
    pub description: String,
    #[serde(rename = "command")]
    pub invocation: Invocation,
    /// Every permission a caller must hold. Empty means any authenticated
    /// caller may run the command.
    #[serde(default, rename = "permissions")]
    pub required_permissions: BTreeSet<PermissionGrant>,
}

impl Command {
    /// Build a command from a legacy single-string command line.
    pub fn new(id: impl Into<String>, command_line: impl Into<String>) -> Self {
        Self {
            id: CommandId::new(id),
            name: String::new(),
            description: String::new(),
            invocation: Invocation::Line(command_line.into()),
            required_permissions: BTreeSet::new(),
        }
    }

    /// Add a required permission. Adding the same name twice is a no-op.
    pub fn require(mut self, permission: impl Into<String>) -> Self {
        self.required_permissions
            .insert(PermissionGrant::new(permission));
        self
    }

    pub fn with_invocation(mut self, invocation: Invocation) -> Self {
        self.invocation = invocation;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
