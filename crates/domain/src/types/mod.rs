//! Domain types and models

pub mod batch;
pub mod catalog;
pub mod enrollment;
pub mod reconciliation;
pub mod student;

pub use batch::{BatchItemError, BatchResult};
pub use catalog::{ClassCatalog, ClassCatalogEntry};
pub use enrollment::{format_document_date, Enrollment, EnrollmentDocument, EnrollmentRef, Subject};
pub use reconciliation::{ClassNameFix, EnrollmentDeletion, MismatchRecord};
pub use student::{
    ResolutionReason, StatusResolution, StatusSyncReport, StudentRecord, StudentStatus,
};
