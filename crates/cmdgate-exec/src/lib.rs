//! # cmdgate-exec
//!
//! The [`ProcessRunner`], cmdgate's implementation of
//! [`CommandRunner`](cmdgate_core::traits::CommandRunner) on top of
//! `std::process`.

pub mod process;

pub use process::ProcessRunner;

// ── Tests ─────────────────────────────────────────────────────────────────────
