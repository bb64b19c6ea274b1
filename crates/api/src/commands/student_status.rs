//! Student status commands

use std::collections::BTreeMap;
use std::time::Instant;

use academy_domain::{
    AcademyError, BatchResult, Result as DomainResult, StatusSyncReport, StudentStatus,
};
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_with_logging;
use crate::utils::logging::log_command_execution;

/// Recompute and persist one student's status from their enrollments.
pub async fn sync_student_status(
    ctx: &AppContext,
    student_id: &str,
) -> DomainResult<StatusSyncReport> {
    execute_with_logging("student_status::sync_student_status", || async {
        let student_id = require_id("student id", student_id)?;
        Ok(ctx.status_sync.sync_student_status(student_id, None).await)
    })
    .await
}

/// Recompute the status of every student.
pub async fn sync_all_students(
    ctx: &AppContext,
    cancel: &CancellationToken,
) -> DomainResult<BatchResult> {
    execute_with_logging("student_status::sync_all_students", || async {
        let result = ctx.status_sync.sync_all_students(cancel).await?;
        Ok(result)
    })
    .await
}

/// Toggle the hold flag of one or more enrollments of a student, then
/// re-resolve the student's status.
///
/// A single update goes through the single-enrollment path; more are
/// written concurrently and the status is only recomputed when every write
/// succeeded.
pub async fn set_enrollment_holds(
    ctx: &AppContext,
    student_id: &str,
    updates: BTreeMap<String, bool>,
    previous: Option<StudentStatus>,
) -> DomainResult<StatusSyncReport> {
    let command = "student_status::set_enrollment_holds";
    let student_id = require_id("student id", student_id)?;
    let updates = normalize_hold_updates(updates)?;

    let start = Instant::now();
    let report = match single_update(&updates) {
        Some((enrollment_id, on_hold)) => {
            ctx.status_sync.update_enrollment_hold(student_id, enrollment_id, on_hold, previous).await
        }
        None => ctx.status_sync.batch_update_enrollment_holds(student_id, &updates, previous).await,
    };

    let error_type = (!report.success).then_some("status_sync");
    log_command_execution(command, start.elapsed(), error_type);
    Ok(report)
}

/// Trim every enrollment id, rejecting blanks and ids that collide once
/// trimmed.
fn normalize_hold_updates(
    updates: BTreeMap<String, bool>,
) -> DomainResult<BTreeMap<String, bool>> {
    if updates.is_empty() {
        return Err(AcademyError::InvalidInput("no enrollment hold updates given".into()));
    }
    let mut normalized = BTreeMap::new();
    for (enrollment_id, on_hold) in updates {
        let trimmed = require_id("enrollment id", &enrollment_id)?;
        if normalized.insert(trimmed.to_string(), on_hold).is_some() {
            return Err(AcademyError::InvalidInput(format!(
                "enrollment id {trimmed} appears more than once"
            )));
        }
    }
    Ok(normalized)
}

fn single_update(updates: &BTreeMap<String, bool>) -> Option<(&str, bool)> {
    if updates.len() != 1 {
        return None;
    }
    updates.iter().next().map(|(id, on_hold)| (id.as_str(), *on_hold))
}

fn require_id<'a>(what: &str, id: &'a str) -> DomainResult<&'a str> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(AcademyError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}
