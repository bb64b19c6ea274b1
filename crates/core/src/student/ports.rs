//! Port interfaces for student records
//!
//! Only the pieces of the student document that reconciliation touches are
//! exposed: the display name and the aggregate status.

use academy_domain::{Result, StudentRecord, StudentStatus};
use async_trait::async_trait;

/// Trait for student record retrieval and status updates
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Get a student by ID, `None` if the student no longer exists
    async fn get_student(&self, student_id: &str) -> Result<Option<StudentRecord>>;

    /// Current status of a student, `None` if the student no longer exists
    async fn get_status(&self, student_id: &str) -> Result<Option<StudentStatus>>;

    /// Overwrite the student's status field
    async fn update_status(&self, student_id: &str, status: StudentStatus) -> Result<()>;

    /// IDs of every student, for sync-all passes
    async fn list_student_ids(&self) -> Result<Vec<String>>;
}
