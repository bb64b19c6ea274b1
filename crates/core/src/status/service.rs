//! Student status sync service - applies resolver decisions to the stores

use std::collections::BTreeMap;
use std::sync::Arc;

use academy_domain::constants::DEFAULT_LOOKUP_BATCH_SIZE;
use academy_domain::{
    BatchResult, Enrollment, EnrollmentRef, Result, StatusResolution, StatusSyncReport,
    StudentStatus,
};
use chrono::NaiveDate;
use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::resolver::EnrollmentStatusResolver;
use crate::batch::run_in_groups;
use crate::reconciliation::ports::EnrollmentStore;
use crate::student::ports::StudentStore;

/// Keeps `student.status` in line with the student's enrollments.
pub struct StatusSyncService {
    enrollments: Arc<dyn EnrollmentStore>,
    students: Arc<dyn StudentStore>,
    lookup_batch_size: usize,
    fixed_today: Option<NaiveDate>,
}

impl StatusSyncService {
    /// Create a new status sync service
    pub fn new(enrollments: Arc<dyn EnrollmentStore>, students: Arc<dyn StudentStore>) -> Self {
        Self {
            enrollments,
            students,
            lookup_batch_size: DEFAULT_LOOKUP_BATCH_SIZE,
            fixed_today: None,
        }
    }

    /// Number of per-student syncs allowed in flight during `sync_students`.
    pub fn with_lookup_batch_size(mut self, size: usize) -> Self {
        self.lookup_batch_size = size.max(1);
        self
    }

    /// Pin "today" instead of reading the local clock on every pass.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn resolver(&self) -> EnrollmentStatusResolver {
        self.fixed_today.map_or_else(EnrollmentStatusResolver::for_today, EnrollmentStatusResolver::new)
    }

    /// Resolve against `enrollments` and write the status only if it changed.
    ///
    /// The snapshot is used as given; nothing is re-read mid-resolution.
    pub async fn resolve_and_persist(
        &self,
        student_id: &str,
        enrollments: &[Enrollment],
        previous: StudentStatus,
    ) -> Result<StatusResolution> {
        let resolution = self.resolver().resolve(enrollments, previous);

        if resolution.changed {
            self.students.update_status(student_id, resolution.new_status).await?;
            info!(
                student_id,
                from = %resolution.previous_status,
                to = %resolution.new_status,
                reason = %resolution.reason,
                "student status synchronised"
            );
        } else {
            debug!(student_id, status = %previous, reason = %resolution.reason, "student status kept");
        }

        Ok(resolution)
    }

    /// Re-derive one student's status from the store.
    ///
    /// When `previous` is `None` the current status is read from the student
    /// store; a missing student or status counts as `active`. Failures are
    /// reported with `success = false`, never returned as `Err`.
    pub async fn sync_student_status(
        &self,
        student_id: &str,
        previous: Option<StudentStatus>,
    ) -> StatusSyncReport {
        match self.try_sync(student_id, previous).await {
            Ok(resolution) => StatusSyncReport::from_resolution(student_id, resolution, 0, 0),
            Err(err) => {
                warn!(student_id, error = %err, "student status sync failed");
                StatusSyncReport::failure(student_id, previous, format!("status sync failed: {err}"))
            }
        }
    }

    /// Toggle one enrollment's hold flag, then sync the student.
    pub async fn update_enrollment_hold(
        &self,
        student_id: &str,
        enrollment_id: &str,
        on_hold: bool,
        previous: Option<StudentStatus>,
    ) -> StatusSyncReport {
        let reference = EnrollmentRef::new(student_id, enrollment_id);

        if let Err(err) = self.enrollments.update_on_hold(&reference, on_hold).await {
            warn!(enrollment = %reference, error = %err, "enrollment hold update failed");
            return StatusSyncReport::failure(
                student_id,
                previous,
                format!("enrollment hold update failed: {err}"),
            )
            .with_write_counts(0, 1);
        }

        self.sync_student_status(student_id, previous).await.with_write_counts(1, 1)
    }

    /// Apply several hold toggles for one student, then resolve once.
    ///
    /// Every write is attempted. If any of them fails the status step is
    /// skipped so the student is never resolved against a half-updated set.
    pub async fn batch_update_enrollment_holds(
        &self,
        student_id: &str,
        updates: &BTreeMap<String, bool>,
        previous: Option<StudentStatus>,
    ) -> StatusSyncReport {
        let attempted = updates.len();

        let writes = updates.iter().map(|(enrollment_id, on_hold)| {
            let reference = EnrollmentRef::new(student_id, enrollment_id.clone());
            async move {
                let outcome = self.enrollments.update_on_hold(&reference, *on_hold).await;
                (reference, outcome)
            }
        });

        let failures: Vec<String> = join_all(writes)
            .await
            .into_iter()
            .filter_map(|(reference, outcome)| {
                outcome.err().map(|err| {
                    warn!(enrollment = %reference, error = %err, "enrollment hold update failed");
                    format!("{reference}: {err}")
                })
            })
            .collect();

        let completed = attempted - failures.len();
        if !failures.is_empty() {
            return StatusSyncReport::failure(
                student_id,
                previous,
                format!(
                    "{} of {attempted} enrollment writes failed, status sync skipped ({})",
                    failures.len(),
                    failures.join("; ")
                ),
            )
            .with_write_counts(completed, attempted);
        }

        self.sync_student_status(student_id, previous).await.with_write_counts(completed, attempted)
    }

    /// Sync many students, `lookup_batch_size` at a time.
    ///
    /// `applied` counts status writes; students whose status was already
    /// correct are attempted but not applied.
    pub async fn sync_students(
        &self,
        student_ids: Vec<String>,
        cancel: &CancellationToken,
    ) -> BatchResult {
        let run = run_in_groups(student_ids, self.lookup_batch_size, cancel, |student_id| async move {
            let outcome = self.try_sync(&student_id, None).await;
            (student_id, outcome)
        })
        .await;

        let mut result = BatchResult::new();
        for (student_id, outcome) in run.outputs {
            match outcome {
                Ok(resolution) if resolution.changed => result.record_applied(),
                Ok(_) => result.record_unchanged(),
                Err(err) => {
                    warn!(student_id, error = %err, "student status sync failed");
                    result.record_error(student_id, err);
                }
            }
        }
        result.cancelled = run.cancelled;

        info!(
            attempted = result.attempted,
            changed = result.applied,
            failed = result.failed_count(),
            cancelled = result.cancelled,
            "student status batch finished"
        );

        result
    }

    /// Sync every student known to the student store.
    pub async fn sync_all_students(&self, cancel: &CancellationToken) -> Result<BatchResult> {
        let student_ids = self.students.list_student_ids().await?;
        Ok(self.sync_students(student_ids, cancel).await)
    }

    async fn try_sync(
        &self,
        student_id: &str,
        previous: Option<StudentStatus>,
    ) -> Result<StatusResolution> {
        let enrollments = self.enrollments.list_for_student(student_id).await?;

        let previous = match previous {
            Some(status) => status,
            None => self.students.get_status(student_id).await?.unwrap_or_default(),
        };

        self.resolve_and_persist(student_id, &enrollments, previous).await
    }
}
