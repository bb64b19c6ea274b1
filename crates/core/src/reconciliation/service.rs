//! Enrollment sync service - scans for mismatched class names and applies fixes

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use academy_domain::constants::DEFAULT_LOOKUP_BATCH_SIZE;
use academy_domain::{
    AcademyError, BatchResult, ClassNameFix, EnrollmentRef, MismatchRecord, Result, Subject,
};
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::name_matcher::{apply_fix, find_mismatches, plan_deletion};
use super::ports::{ClassCatalogStore, EnrollmentStore};
use crate::batch::run_in_groups;
use crate::student::ports::StudentStore;

/// Enrollment class-name reconciliation
pub struct EnrollmentSyncService {
    enrollments: Arc<dyn EnrollmentStore>,
    catalog: Arc<dyn ClassCatalogStore>,
    students: Arc<dyn StudentStore>,
    lookup_batch_size: usize,
}

impl EnrollmentSyncService {
    /// Create a new enrollment sync service
    pub fn new(
        enrollments: Arc<dyn EnrollmentStore>,
        catalog: Arc<dyn ClassCatalogStore>,
        students: Arc<dyn StudentStore>,
    ) -> Self {
        Self { enrollments, catalog, students, lookup_batch_size: DEFAULT_LOOKUP_BATCH_SIZE }
    }

    /// Number of student-name lookups allowed in flight at once.
    pub fn with_lookup_batch_size(mut self, size: usize) -> Self {
        self.lookup_batch_size = size.max(1);
        self
    }

    /// Enrollments whose class name is not in the active catalog.
    ///
    /// Student names are attached on a best-effort basis; a failed or
    /// cancelled lookup leaves `student_name` empty.
    pub async fn scan_mismatches(
        &self,
        subject_filter: Option<Subject>,
        cancel: &CancellationToken,
    ) -> Result<Vec<MismatchRecord>> {
        let (enrollments, catalog) = futures::try_join!(
            self.enrollments.list_all(subject_filter),
            self.catalog.list_active_classes()
        )?;

        let mut mismatches = find_mismatches(&enrollments, &catalog, subject_filter);
        self.attach_student_names(&mut mismatches, cancel).await;

        info!(
            scanned = enrollments.len(),
            catalog_size = catalog.len(),
            mismatches = mismatches.len(),
            subject = subject_filter.map(|s| s.to_string()),
            "enrollment class-name scan finished"
        );

        Ok(mismatches)
    }

    /// Rewrite class names one at a time.
    ///
    /// Enrollments that disappeared since the scan, or fixes with an empty
    /// target name, are skipped. Applied fixes are kept on failure or cancel.
    pub async fn apply_fixes(
        &self,
        fixes: Vec<ClassNameFix>,
        cancel: &CancellationToken,
    ) -> BatchResult {
        let mut result = BatchResult::new();

        for fix in fixes {
            if cancel.is_cancelled() {
                result.cancelled = true;
                break;
            }

            match self.apply_one_fix(&fix).await {
                Ok(()) => {
                    debug!(enrollment = %fix.enrollment, class_name = %fix.new_class_name, "class name fixed");
                    result.record_applied();
                }
                Err(err) => {
                    warn!(enrollment = %fix.enrollment, error = %err, "class name fix not applied");
                    result.record_error(fix.enrollment.to_string(), err);
                }
            }
        }

        info!(
            fixed = result.fixed(),
            skipped = result.skipped_count(),
            failed = result.failed_count(),
            cancelled = result.cancelled,
            "class name fixes finished"
        );

        result
    }

    /// Delete enrollments one at a time.
    pub async fn delete_enrollments(
        &self,
        references: Vec<EnrollmentRef>,
        cancel: &CancellationToken,
    ) -> BatchResult {
        let mut result = BatchResult::new();

        for reference in references {
            if cancel.is_cancelled() {
                result.cancelled = true;
                break;
            }

            match self.delete_one(&reference).await {
                Ok(()) => result.record_applied(),
                Err(err) => {
                    warn!(enrollment = %reference, error = %err, "enrollment not deleted");
                    result.record_error(reference.to_string(), err);
                }
            }
        }

        info!(
            deleted = result.applied,
            skipped = result.skipped_count(),
            failed = result.failed_count(),
            cancelled = result.cancelled,
            "enrollment deletion finished"
        );

        result
    }

    async fn apply_one_fix(&self, fix: &ClassNameFix) -> Result<()> {
        if fix.new_class_name.is_empty() {
            return Err(AcademyError::InvalidInput(format!(
                "empty class name for enrollment {}",
                fix.enrollment
            )));
        }

        let current = self.enrollments.get(&fix.enrollment).await?;
        let now = Utc::now();
        let updated = apply_fix(&current, &fix.new_class_name, now);

        self.enrollments.update_class_name(&fix.enrollment, &updated.class_name, now).await
    }

    async fn delete_one(&self, reference: &EnrollmentRef) -> Result<()> {
        let current = self.enrollments.get(reference).await?;
        let deletion = plan_deletion(&current);
        debug!(enrollment = %deletion.enrollment, class_name = %deletion.observed_class_name, "deleting enrollment");

        self.enrollments.delete(&deletion.enrollment).await
    }

    async fn attach_student_names(
        &self,
        mismatches: &mut [MismatchRecord],
        cancel: &CancellationToken,
    ) {
        let student_ids: Vec<String> = mismatches
            .iter()
            .map(|m| m.enrollment.student_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if student_ids.is_empty() {
            return;
        }

        let run = run_in_groups(student_ids, self.lookup_batch_size, cancel, |student_id| async move {
            let lookup = self.students.get_student(&student_id).await;
            (student_id, lookup)
        })
        .await;

        let mut names = HashMap::new();
        for (student_id, lookup) in run.outputs {
            match lookup {
                Ok(Some(student)) => {
                    names.insert(student_id, student.name);
                }
                Ok(None) => debug!(student_id, "student not found for mismatch"),
                Err(err) => warn!(student_id, error = %err, "student name lookup failed"),
            }
        }

        if run.cancelled {
            warn!(resolved = names.len(), "student name lookup cancelled");
        }

        for mismatch in mismatches.iter_mut() {
            mismatch.student_name = names.get(&mismatch.enrollment.student_id).cloned();
        }
    }
}
