//! # Academy Domain
//!
//! Business domain types and models for enrollment reconciliation.
//!
//! This crate contains:
//! - Enrollment, catalog and student status types
//! - Validation of raw store documents into typed values
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other academy crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
