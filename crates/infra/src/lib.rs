//! # Academy Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories for enrollments, students and the class catalog
//! - Configuration loading from environment and files
//! - Logging setup
//!
//! ## Architecture
//! - Implements traits defined in `academy-core`
//! - Contains all "impure" code (I/O, database access)

pub mod config;
pub mod database;
pub mod errors;
pub mod observability;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use observability::init_tracing;
