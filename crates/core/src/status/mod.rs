//! Student status derivation from enrollments

pub mod resolver;
pub mod service;

pub use resolver::EnrollmentStatusResolver;
pub use service::StatusSyncService;
