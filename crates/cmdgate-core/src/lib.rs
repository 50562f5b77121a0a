//! # cmdgate-core
//!
//! The authorize-then-execute pipeline for cmdgate.
//!
//! This crate provides:
//! - The two core traits (`PermissionPolicy`, `CommandRunner`)
//! - The `Gateway` that wires them together in the correct order
//! - `GatewayResponse`, the HTTP-shaped view of an outcome
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cmdgate_core::{Gateway, GatewayResponse};
//!
//! let gateway = Gateway::new(Box::new(policy), Box::new(runner));
//! let outcome = gateway.invoke(&command, &caller.abilities)?;
//! let response = GatewayResponse::from_outcome(&outcome);
//! ```

pub mod gateway;
pub mod response;
pub mod traits;

pub use gateway::Gateway;
pub use response::GatewayResponse;
