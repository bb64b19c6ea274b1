//! Batch execution helpers
//!
//! Collaborator services fan out per-student lookups and syncs. This module
//! bounds how many of those futures are in flight at once and lets a caller
//! stop a long batch between groups.

pub mod groups;

pub use groups::{run_in_groups, GroupedRun};
