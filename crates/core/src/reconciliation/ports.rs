//! Port interfaces for enrollment and class catalog storage
//!
//! These traits define the boundaries between the reconciliation services
//! and the document store that actually holds enrollments and classes.
//! Implementations validate raw documents before handing them out; callers
//! only ever receive typed [`Enrollment`] values.

use academy_domain::{ClassCatalog, Enrollment, EnrollmentRef, Result, Subject};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for enrollment documents scoped under a student
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// All enrollments of one student, withdrawn ones included.
    ///
    /// Fails with `InvalidInput` if any of them does not validate; callers
    /// resolve status from this set and must never see a partial one.
    async fn list_for_student(&self, student_id: &str) -> Result<Vec<Enrollment>>;

    /// Scan enrollments across all students, optionally for one subject.
    /// Invalid documents are left out.
    async fn list_all(&self, subject: Option<Subject>) -> Result<Vec<Enrollment>>;

    /// Fetch a single enrollment
    ///
    /// Returns `AcademyError::NotFound` if it no longer exists.
    async fn get(&self, reference: &EnrollmentRef) -> Result<Enrollment>;

    /// Patch `className` and `updatedAt`
    async fn update_class_name(
        &self,
        reference: &EnrollmentRef,
        class_name: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Patch `onHold`
    async fn update_on_hold(&self, reference: &EnrollmentRef, on_hold: bool) -> Result<()>;

    /// Delete a single enrollment
    async fn delete(&self, reference: &EnrollmentRef) -> Result<()>;
}

/// Trait for reading the currently active class catalog
#[async_trait]
pub trait ClassCatalogStore: Send + Sync {
    /// Active classes in catalog order
    async fn list_active_classes(&self) -> Result<ClassCatalog>;
}
