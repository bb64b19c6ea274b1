//! Student aggregate status and the outcome of resolving it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Aggregate status persisted on the student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    #[default]
    Active,
    OnHold,
    Withdrawn,
    Prospect,
    Prospective,
}

impl_domain_status_conversions!(StudentStatus {
    Active => "active",
    OnHold => "on_hold",
    Withdrawn => "withdrawn",
    Prospect => "prospect",
    Prospective => "prospective",
});

impl StudentStatus {
    /// Manual overrides that automatic resolution never replaces.
    pub fn is_sticky(self) -> bool {
        matches!(self, Self::Withdrawn | Self::Prospect | Self::Prospective)
    }
}

/// Student as read from the student store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub status: StudentStatus,
}

/// Why a resolution pass produced the status it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionReason {
    ManualStatusPreserved,
    NoLiveEnrollments,
    StatusUnchanged,
    AllEnrollmentsOnHold,
    ActiveEnrollmentPresent,
}

impl fmt::Display for ResolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ManualStatusPreserved => "manual status preserved",
            Self::NoLiveEnrollments => "no live enrollments, status preserved",
            Self::StatusUnchanged => "status unchanged",
            Self::AllEnrollmentsOnHold => "all live enrollments are on hold (auto-sync)",
            Self::ActiveEnrollmentPresent => "at least one live enrollment is active (auto-sync)",
        };
        f.write_str(text)
    }
}

/// Pure decision returned by the status resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResolution {
    pub previous_status: StudentStatus,
    pub new_status: StudentStatus,
    pub changed: bool,
    pub reason: ResolutionReason,
}

impl StatusResolution {
    pub fn unchanged(status: StudentStatus, reason: ResolutionReason) -> Self {
        Self { previous_status: status, new_status: status, changed: false, reason }
    }

    pub fn transition(from: StudentStatus, to: StudentStatus, reason: ResolutionReason) -> Self {
        Self { previous_status: from, new_status: to, changed: from != to, reason }
    }
}

/// Outcome of a status sync performed against the stores.
///
/// Sync operations report failures here instead of returning `Err`, so a
/// caller driving many students never has to unwind across the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSyncReport {
    pub student_id: String,
    pub success: bool,
    pub previous_status: Option<StudentStatus>,
    pub new_status: Option<StudentStatus>,
    pub changed: bool,
    pub reason: String,
    /// Enrollment writes completed before the status step (batch variant).
    pub enrollment_writes_completed: usize,
    pub enrollment_writes_attempted: usize,
}

impl StatusSyncReport {
    pub fn from_resolution(
        student_id: impl Into<String>,
        resolution: StatusResolution,
        writes_completed: usize,
        writes_attempted: usize,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            success: true,
            previous_status: Some(resolution.previous_status),
            new_status: Some(resolution.new_status),
            changed: resolution.changed,
            reason: resolution.reason.to_string(),
            enrollment_writes_completed: writes_completed,
            enrollment_writes_attempted: writes_attempted,
        }
    }

    pub fn failure(
        student_id: impl Into<String>,
        previous_status: Option<StudentStatus>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            success: false,
            previous_status,
            new_status: previous_status,
            changed: false,
            reason: reason.into(),
            enrollment_writes_completed: 0,
            enrollment_writes_attempted: 0,
        }
    }

    pub fn with_write_counts(mut self, completed: usize, attempted: usize) -> Self {
        self.enrollment_writes_completed = completed;
        self.enrollment_writes_attempted = attempted;
        self
    }
}
