//! # Academy Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Class-name mismatch detection and suggestions
//! - Student status resolution from enrollments
//! - Port interfaces (traits) for the stores the services talk to
//! - Services that apply fixes and status changes through those ports
//!
//! ## Architecture Principles
//! - Only depends on `academy-domain`
//! - No database or platform code
//! - All external dependencies via traits

pub mod batch;
pub mod reconciliation;
pub mod status;
pub mod student;

pub use batch::{run_in_groups, GroupedRun};
pub use reconciliation::{
    apply_fix, find_mismatches, levenshtein, plan_deletion, ClassCatalogStore,
    EnrollmentStore, EnrollmentSyncService, NameMatcher,
};
pub use status::{EnrollmentStatusResolver, StatusSyncService};
pub use student::StudentStore;
