//! SQLite-backed enrollment store.
//!
//! Rows are read into [`EnrollmentDocument`]s and validated with
//! `Enrollment::try_from`. Catalog-wide scans log invalid rows and leave them
//! out; a per-student read fails on the first invalid row instead, since
//! status resolution needs the student's complete enrollment set. All
//! database operations run in `spawn_blocking` to avoid blocking the async
//! runtime.

use std::sync::Arc;

use academy_core::EnrollmentStore;
use academy_domain::{
    AcademyError, Enrollment, EnrollmentDocument, EnrollmentRef, Result as DomainResult, Subject,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;
use tracing::warn;

use super::manager::{DbManager, SqliteConnection};
use crate::errors::conversions::{map_join_error, map_sql_error};

/// What a listing does with rows that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InvalidRows {
    Skip,
    Reject,
}

const SELECT_ENROLLMENT: &str = "SELECT id, student_id, class_name, subject, on_hold,
        enrollment_date, start_date, withdrawal_date, end_date, updated_at
     FROM enrollments";

/// SQLite-backed enrollment repository.
pub struct SqliteEnrollmentRepository {
    db: Arc<DbManager>,
}

impl SqliteEnrollmentRepository {
    /// Create a new repository with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or replace one enrollment.
    pub async fn save(&self, enrollment: &Enrollment) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let document = EnrollmentDocument::from(enrollment);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            upsert_document(&conn, &document).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_where(
        &self,
        student_id: Option<String>,
        subject: Option<Subject>,
        invalid_rows: InvalidRows,
    ) -> DomainResult<Vec<Enrollment>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Enrollment>> {
            let conn = db.get_connection()?;
            let documents = query_documents(&conn, student_id.as_deref()).map_err(map_sql_error)?;
            let enrollments = match invalid_rows {
                InvalidRows::Skip => validate_documents(documents),
                InvalidRows::Reject => documents
                    .into_iter()
                    .map(Enrollment::try_from)
                    .collect::<DomainResult<Vec<_>>>()?,
            };
            Ok(enrollments
                .into_iter()
                .filter(|e| subject.map_or(true, |s| e.subject == s))
                .collect())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn execute_for(
        &self,
        reference: &EnrollmentRef,
        sql: &'static str,
        value: rusqlite::types::Value,
        updated_at: String,
    ) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let reference = reference.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(sql, params![value, updated_at, reference.student_id, reference.enrollment_id])
                .map_err(map_sql_error)?;
            if changed == 0 {
                return Err(AcademyError::NotFound(format!("enrollment {reference}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl EnrollmentStore for SqliteEnrollmentRepository {
    async fn list_for_student(&self, student_id: &str) -> DomainResult<Vec<Enrollment>> {
        self.list_where(Some(student_id.to_string()), None, InvalidRows::Reject).await
    }

    async fn list_all(&self, subject: Option<Subject>) -> DomainResult<Vec<Enrollment>> {
        self.list_where(None, subject, InvalidRows::Skip).await
    }

    async fn get(&self, reference: &EnrollmentRef) -> DomainResult<Enrollment> {
        let db = Arc::clone(&self.db);
        let reference = reference.clone();

        task::spawn_blocking(move || -> DomainResult<Enrollment> {
            let conn = db.get_connection()?;
            let document = conn
                .query_row(
                    &format!("{SELECT_ENROLLMENT} WHERE student_id = ?1 AND id = ?2"),
                    params![reference.student_id, reference.enrollment_id],
                    map_document,
                )
                .optional()
                .map_err(map_sql_error)?
                .ok_or_else(|| AcademyError::NotFound(format!("enrollment {reference}")))?;
            Enrollment::try_from(document)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update_class_name(
        &self,
        reference: &EnrollmentRef,
        class_name: &str,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.execute_for(
            reference,
            "UPDATE enrollments SET class_name = ?1, updated_at = ?2
             WHERE student_id = ?3 AND id = ?4",
            rusqlite::types::Value::Text(class_name.to_string()),
            updated_at.to_rfc3339(),
        )
        .await
    }

    async fn update_on_hold(&self, reference: &EnrollmentRef, on_hold: bool) -> DomainResult<()> {
        self.execute_for(
            reference,
            "UPDATE enrollments SET on_hold = ?1, updated_at = ?2
             WHERE student_id = ?3 AND id = ?4",
            rusqlite::types::Value::Integer(i64::from(on_hold)),
            Utc::now().to_rfc3339(),
        )
        .await
    }

    async fn delete(&self, reference: &EnrollmentRef) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let reference = reference.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let deleted = conn
                .execute(
                    "DELETE FROM enrollments WHERE student_id = ?1 AND id = ?2",
                    params![reference.student_id, reference.enrollment_id],
                )
                .map_err(map_sql_error)?;
            if deleted == 0 {
                return Err(AcademyError::NotFound(format!("enrollment {reference}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

fn query_documents(
    conn: &SqliteConnection,
    student_id: Option<&str>,
) -> rusqlite::Result<Vec<EnrollmentDocument>> {
    let sql = format!(
        "{SELECT_ENROLLMENT} WHERE (?1 IS NULL OR student_id = ?1) ORDER BY student_id, rowid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![student_id], map_document)?;
    rows.collect()
}

fn map_document(row: &Row<'_>) -> rusqlite::Result<EnrollmentDocument> {
    Ok(EnrollmentDocument {
        id: row.get(0)?,
        student_id: row.get(1)?,
        class_name: row.get(2)?,
        subject: row.get(3)?,
        on_hold: row.get(4)?,
        enrollment_date: row.get(5)?,
        start_date: row.get(6)?,
        withdrawal_date: row.get(7)?,
        end_date: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Keep the documents that validate; log the rest.
fn validate_documents(documents: Vec<EnrollmentDocument>) -> Vec<Enrollment> {
    documents
        .into_iter()
        .filter_map(|document| {
            let reference = EnrollmentRef::new(document.student_id.clone(), document.id.clone());
            match Enrollment::try_from(document) {
                Ok(enrollment) => Some(enrollment),
                Err(err) => {
                    warn!(enrollment = %reference, error = %err, "skipping invalid enrollment row");
                    None
                }
            }
        })
        .collect()
}

fn upsert_document(conn: &SqliteConnection, document: &EnrollmentDocument) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO enrollments (id, student_id, class_name, subject, on_hold,
            enrollment_date, start_date, withdrawal_date, end_date, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7, NULL, ?8)
         ON CONFLICT(student_id, id) DO UPDATE SET
            class_name = excluded.class_name,
            subject = excluded.subject,
            on_hold = excluded.on_hold,
            enrollment_date = excluded.enrollment_date,
            start_date = NULL,
            withdrawal_date = excluded.withdrawal_date,
            end_date = NULL,
            updated_at = excluded.updated_at",
        params![
            document.id,
            document.student_id,
            document.class_name,
            document.subject,
            document.on_hold,
            document.enrollment_date,
            document.withdrawal_date,
            document.updated_at,
        ],
    )?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
