//! # Academy App
//!
//! Application layer - commands and the `academy` command line entry point.
//!
//! This crate contains:
//! - Commands wrapping the reconciliation and status services
//! - Application context (dependency injection)
//! - Command timing and health reporting helpers
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the SQLite repositories into the core services

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
