//! cmdgate — run whitelisted host commands behind a permission check.
//!
//! Loads a TOML command registry, resolves the requested command, checks the
//! caller's grants against the command's required permissions and, when they
//! are covered, runs it. The result is printed as the JSON response an HTTP
//! front end would send.
//!
//! Usage:
//!   cmdgate list  --registry cli/commands.toml
//!   cmdgate check --registry cli/commands.toml uptime --grant host:read
//!   cmdgate run   --registry cli/commands.toml uptime --grant host:read

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cmdgate_contracts::{error::GateResult, grants::CallerGrantSet};
use cmdgate_core::{Gateway, GatewayResponse};
use cmdgate_exec::ProcessRunner;
use cmdgate_policy::{CommandRegistry, RequiredPermissionsPolicy};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Permission-gated remote command gateway.
#[derive(Parser)]
#[command(
    name = "cmdgate",
    about = "Run registered host commands after a required-permission check",
    long_about = "Resolves a command from a TOML registry, verifies that the supplied\n\
                  grants cover every permission it requires, runs it, and prints the\n\
                  JSON response (200 output / 403 denial / 500 failure)."
)]
struct Cli {
    /// Path to the TOML command registry.
    #[arg(long, global = true, default_value = "commands.toml")]
    registry: PathBuf,

    #[command(subcommand)]
    command: Action,
}

#[derive(Subcommand)]
enum Action {
    /// List registered commands and the permissions each requires.
    List,
    /// Check authorization only. Nothing is executed.
    Check(Request),
    /// Authorize and run a command.
    Run(Request),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Check(_) => "check",
            Action::Run(_) => "run",
        }
    }
}

#[derive(clap::Args)]
struct Request {
    /// Identifier of the command to invoke.
    id: String,

    /// A permission held by the caller. Repeat for several; omit for none.
    #[arg(long = "grant", value_name = "PERMISSION")]
    grants: Vec<String>,
}

impl Request {
    fn grant_set(&self) -> CallerGrantSet {
        self.grants.iter().cloned().collect()
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let response = match run(&cli) {
        Ok(Some(response)) => response,
        Ok(None) => return,
        Err(e) => GatewayResponse::from_error(&e),
    };

    print_response(&response);
    if !response.is_success() {
        std::process::exit(1);
    }
}

// ── Action dispatch ───────────────────────────────────────────────────────────

fn run(cli: &Cli) -> GateResult<Option<GatewayResponse>> {
    debug!(registry = %cli.registry.display(), action = cli.command.name(), "cmdgate starting");
    let registry = CommandRegistry::from_file(&cli.registry)?;
    let gateway = Gateway::new(
        Box::new(RequiredPermissionsPolicy::new()),
        Box::new(ProcessRunner::new()),
    );

    match &cli.command {
        Action::List => {
            list(&registry);
            Ok(None)
        }
        Action::Check(req) => {
            let command = registry.get(&req.id)?;
            gateway.authorize(command, &req.grant_set())?;
            Ok(Some(GatewayResponse {
                status: cmdgate_core::response::STATUS_OK,
                body: serde_json::json!({ "authorized": true, "command": req.id }),
            }))
        }
        Action::Run(req) => {
            let command = registry.get(&req.id)?;
            let outcome = gateway.invoke(command, &req.grant_set())?;
            Ok(Some(GatewayResponse::from_outcome(&outcome)))
        }
    }
}

fn list(registry: &CommandRegistry) {
    for command in registry.list() {
        let permissions: Vec<&str> = command
            .required_permissions
            .iter()
            .map(|p| p.name())
            .collect();
        let permissions = if permissions.is_empty() {
            "(none)".to_string()
        } else {
            permissions.join(", ")
        };
        println!("{:<16} {}", command.id, command.invocation);
        if !command.description.is_empty() {
            println!("{:<16} {}", "", command.description);
        }
        println!("{:<16} requires: {}", "", permissions);
    }
}

fn print_response(response: &GatewayResponse) {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to render response: {}", e),
    }
}
