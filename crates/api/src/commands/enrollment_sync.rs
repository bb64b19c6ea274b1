//! Class-name reconciliation commands

use academy_domain::{
    AcademyError, BatchResult, ClassNameFix, EnrollmentRef, MismatchRecord, Result as DomainResult,
    Subject,
};
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_with_logging;

/// List enrollments whose class name is not in the active catalog, with
/// suggested replacements.
pub async fn scan_class_mismatches(
    ctx: &AppContext,
    subject: Option<Subject>,
    cancel: &CancellationToken,
) -> DomainResult<Vec<MismatchRecord>> {
    execute_with_logging("enrollment_sync::scan_class_mismatches", || async {
        let mismatches = ctx.enrollment_sync.scan_mismatches(subject, cancel).await?;
        tracing::info!(
            subject = ?subject,
            mismatches = mismatches.len(),
            "class name scan finished"
        );
        Ok(mismatches)
    })
    .await
}

/// Rewrite the class name of each referenced enrollment.
pub async fn apply_class_name_fixes(
    ctx: &AppContext,
    fixes: Vec<ClassNameFix>,
    cancel: &CancellationToken,
) -> DomainResult<BatchResult> {
    execute_with_logging("enrollment_sync::apply_class_name_fixes", || async {
        ensure_unique(fixes.iter().map(|fix| &fix.enrollment))?;
        let result = ctx.enrollment_sync.apply_fixes(fixes, cancel).await;
        Ok(result)
    })
    .await
}

/// Delete each referenced enrollment.
pub async fn delete_enrollments(
    ctx: &AppContext,
    references: Vec<EnrollmentRef>,
    cancel: &CancellationToken,
) -> DomainResult<BatchResult> {
    execute_with_logging("enrollment_sync::delete_enrollments", || async {
        ensure_unique(references.iter())?;
        let result = ctx.enrollment_sync.delete_enrollments(references, cancel).await;
        Ok(result)
    })
    .await
}

/// Parse `student_id/enrollment_id`.
pub fn parse_enrollment_ref(raw: &str) -> DomainResult<EnrollmentRef> {
    match raw.split_once('/') {
        Some((student_id, enrollment_id))
            if !student_id.trim().is_empty()
                && !enrollment_id.trim().is_empty()
                && !enrollment_id.contains('/') =>
        {
            Ok(EnrollmentRef::new(student_id.trim(), enrollment_id.trim()))
        }
        _ => Err(AcademyError::InvalidInput(format!(
            "expected STUDENT_ID/ENROLLMENT_ID, got '{raw}'"
        ))),
    }
}

/// A batch naming the same enrollment twice is rejected before any write.
fn ensure_unique<'a>(references: impl Iterator<Item = &'a EnrollmentRef>) -> DomainResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for reference in references {
        if !seen.insert(reference) {
            return Err(AcademyError::InvalidInput(format!(
                "enrollment {reference} appears more than once in the batch"
            )));
        }
    }
    Ok(())
}
