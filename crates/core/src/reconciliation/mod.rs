//! Enrollment class-name reconciliation

pub mod levenshtein;
pub mod name_matcher;
pub mod ports;
pub mod service;

pub use levenshtein::levenshtein;
pub use name_matcher::{apply_fix, find_mismatches, plan_deletion, NameMatcher};
pub use ports::*;
pub use service::EnrollmentSyncService;
