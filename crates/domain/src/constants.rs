//! Application constants
//!
//! Centralized location for the fixed thresholds used by the reconciliation
//! engines and their collaborators.

// Name matching thresholds
pub const MAX_SUGGESTIONS: usize = 5;
pub const MAX_SUGGESTION_EDIT_DISTANCE: usize = 3;

// Collaborator batching
pub const DEFAULT_LOOKUP_BATCH_SIZE: usize = 50;
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

// Document date format (YYYY-MM-DD)
pub const DOCUMENT_DATE_FORMAT: &str = "%Y-%m-%d";
