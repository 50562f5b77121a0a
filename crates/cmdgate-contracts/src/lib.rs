//! # cmdgate-contracts
//!
//! Shared types, outcomes, and errors for the cmdgate command gateway.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod command;
pub mod error;
pub mod execution;
pub mod grants;
