//! Integration tests for the enrollment and status commands

mod support;

use std::collections::BTreeMap;

use academy_core::{EnrollmentStore, StudentStore};
use academy_domain::{AcademyError, ClassNameFix, EnrollmentRef, StudentStatus, Subject};
use academy_lib::{
    apply_class_name_fixes, delete_enrollments, get_app_health, scan_class_mismatches,
    set_enrollment_holds, sync_all_students, sync_student_status,
};
use support::create_seeded_context;
use tokio_util::sync::CancellationToken;

#[tokio::test(flavor = "multi_thread")]
async fn scan_reports_misspelled_class_with_suggestion() {
    let (ctx, _temp_dir) = create_seeded_context().await;

    let mismatches =
        scan_class_mismatches(&ctx, None, &CancellationToken::new()).await.expect("scan runs");

    assert_eq!(mismatches.len(), 1);
    let mismatch = &mismatches[0];
    assert_eq!(mismatch.enrollment, EnrollmentRef::new("s1", "e1"));
    assert_eq!(mismatch.student_name.as_deref(), Some("Kim Minji"));
    assert_eq!(mismatch.observed_class_name, "중등M 심하");
    assert_eq!(mismatch.suggested_matches, vec!["중등M 심화"]);

    let english = scan_class_mismatches(&ctx, Some(Subject::English), &CancellationToken::new())
        .await
        .expect("filtered scan runs");
    assert!(english.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn fix_then_rescan_is_clean() {
    let (ctx, _temp_dir) = create_seeded_context().await;
    let cancel = CancellationToken::new();

    let result = apply_class_name_fixes(
        &ctx,
        vec![ClassNameFix::new(EnrollmentRef::new("s1", "e1"), "중등M 심화")],
        &cancel,
    )
    .await
    .expect("fix batch runs");

    assert_eq!(result.applied, 1);
    assert!(result.is_complete_success());
    assert!(scan_class_mismatches(&ctx, None, &cancel).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_fixes_are_rejected_before_writing() {
    let (ctx, _temp_dir) = create_seeded_context().await;
    let reference = EnrollmentRef::new("s1", "e1");

    let result = apply_class_name_fixes(
        &ctx,
        vec![
            ClassNameFix::new(reference.clone(), "중등M 심화"),
            ClassNameFix::new(reference.clone(), "PRE-A"),
        ],
        &CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(AcademyError::InvalidInput(_))));
    let stored = ctx.enrollments.get(&reference).await.unwrap();
    assert_eq!(stored.class_name, "중등M 심하");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_enrollment_and_skips_missing() {
    let (ctx, _temp_dir) = create_seeded_context().await;

    let result = delete_enrollments(
        &ctx,
        vec![EnrollmentRef::new("s2", "e3"), EnrollmentRef::new("s2", "gone")],
        &CancellationToken::new(),
    )
    .await
    .expect("delete batch runs");

    assert_eq!(result.applied, 1);
    assert_eq!(result.skipped_count(), 1);
    assert!(ctx.enrollments.list_for_student("s2").await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelled_batch_writes_nothing() {
    let (ctx, _temp_dir) = create_seeded_context().await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = delete_enrollments(&ctx, vec![EnrollmentRef::new("s2", "e3")], &cancel)
        .await
        .expect("batch returns a result");

    assert!(result.cancelled);
    assert_eq!(result.applied, 0);
    assert_eq!(ctx.enrollments.list_for_student("s2").await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_keeps_active_student_active() {
    let (ctx, _temp_dir) = create_seeded_context().await;

    let report = sync_student_status(&ctx, "s1").await.expect("sync runs");

    assert!(report.success);
    assert!(!report.changed);
    assert_eq!(report.new_status, Some(StudentStatus::Active));
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_student_id_is_invalid_input() {
    let (ctx, _temp_dir) = create_seeded_context().await;

    let result = sync_student_status(&ctx, "   ").await;

    assert!(matches!(result, Err(AcademyError::InvalidInput(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn holding_last_active_enrollment_puts_student_on_hold() {
    let (ctx, _temp_dir) = create_seeded_context().await;

    let updates = BTreeMap::from([("e1".to_string(), true)]);
    let report = set_enrollment_holds(&ctx, "s1", updates, None).await.expect("hold runs");

    assert!(report.success);
    assert!(report.changed);
    assert_eq!(report.new_status, Some(StudentStatus::OnHold));
    assert_eq!(report.enrollment_writes_completed, 1);
    assert_eq!(ctx.students.get_status("s1").await.unwrap(), Some(StudentStatus::OnHold));
}

#[tokio::test(flavor = "multi_thread")]
async fn padded_enrollment_id_writes_the_trimmed_enrollment() {
    let (ctx, _temp_dir) = create_seeded_context().await;

    let updates = BTreeMap::from([(" e1 ".to_string(), true)]);
    let report = set_enrollment_holds(&ctx, "s1", updates, None).await.expect("hold runs");

    assert!(report.success);
    assert_eq!(report.enrollment_writes_completed, 1);
    assert_eq!(report.new_status, Some(StudentStatus::OnHold));
    let stored = ctx.enrollments.get(&EnrollmentRef::new("s1", "e1")).await.unwrap();
    assert!(stored.on_hold);
}

#[tokio::test(flavor = "multi_thread")]
async fn releasing_holds_in_batch_restores_active() {
    let (ctx, _temp_dir) = create_seeded_context().await;
    ctx.students.update_status("s1", StudentStatus::OnHold).await.unwrap();

    let updates = BTreeMap::from([("e1".to_string(), false), ("e2".to_string(), false)]);
    let report = set_enrollment_holds(&ctx, "s1", updates, Some(StudentStatus::OnHold))
        .await
        .expect("batch hold runs");

    assert!(report.success);
    assert_eq!(report.enrollment_writes_completed, 2);
    assert_eq!(report.enrollment_writes_attempted, 2);
    assert_eq!(report.new_status, Some(StudentStatus::Active));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_hold_update_is_rejected() {
    let (ctx, _temp_dir) = create_seeded_context().await;

    let result = set_enrollment_holds(&ctx, "s1", BTreeMap::new(), None).await;

    assert!(matches!(result, Err(AcademyError::InvalidInput(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_all_leaves_settled_students_alone() {
    let (ctx, _temp_dir) = create_seeded_context().await;

    let result = sync_all_students(&ctx, &CancellationToken::new()).await.expect("sync-all runs");

    // s1 is already active, s2 has no live enrollments.
    assert_eq!(result.attempted, 2);
    assert_eq!(result.applied, 0);
    assert!(result.is_complete_success());
}

#[tokio::test(flavor = "multi_thread")]
async fn health_command_reports_components() {
    let (ctx, _temp_dir) = create_seeded_context().await;

    let health = get_app_health(&ctx).await;

    assert!(health.is_healthy);
    assert_eq!(health.components.len(), 2);
}
