//! SQLite-backed student store.
//!
//! A NULL or blank `status` column reads as `active`.

use std::sync::Arc;

use academy_core::StudentStore;
use academy_domain::{AcademyError, Result as DomainResult, StudentRecord, StudentStatus};
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use tokio::task;

use super::manager::DbManager;
use crate::errors::conversions::{map_join_error, map_sql_error};

/// SQLite-backed student repository.
pub struct SqliteStudentRepository {
    db: Arc<DbManager>,
}

impl SqliteStudentRepository {
    /// Create a new repository with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or replace one student.
    pub async fn save(&self, student: &StudentRecord) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let student = student.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO students (id, name, status) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name, status = excluded.status",
                params![student.id, student.name, student.status.to_string()],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl StudentStore for SqliteStudentRepository {
    async fn get_student(&self, student_id: &str) -> DomainResult<Option<StudentRecord>> {
        let db = Arc::clone(&self.db);
        let student_id = student_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<StudentRecord>> {
            let conn = db.get_connection()?;
            let row = conn
                .query_row(
                    "SELECT id, name, status FROM students WHERE id = ?1",
                    params![student_id],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, Option<String>>(2)?,
                        ))
                    },
                )
                .optional()
                .map_err(map_sql_error)?;

            match row {
                Some((id, name, status)) => {
                    let status = parse_status(&id, status.as_deref())?;
                    Ok(Some(StudentRecord { id, name, status }))
                }
                None => Ok(None),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_status(&self, student_id: &str) -> DomainResult<Option<StudentStatus>> {
        Ok(self.get_student(student_id).await?.map(|student| student.status))
    }

    async fn update_status(&self, student_id: &str, status: StudentStatus) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let student_id = student_id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE students SET status = ?1 WHERE id = ?2",
                    params![status.to_string(), student_id],
                )
                .map_err(map_sql_error)?;
            if changed == 0 {
                return Err(AcademyError::NotFound(format!("student {student_id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_student_ids(&self) -> DomainResult<Vec<String>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<String>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare("SELECT id FROM students ORDER BY id").map_err(map_sql_error)?;
            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(ids)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn parse_status(student_id: &str, raw: Option<&str>) -> DomainResult<StudentStatus> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(StudentStatus::default()),
        Some(value) => value.parse::<StudentStatus>().map_err(|e| {
            AcademyError::InvalidInput(format!("student {student_id}: {e}"))
        }),
    }
}
