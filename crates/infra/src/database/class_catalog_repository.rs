//! SQLite-backed class catalog.

use std::sync::Arc;

use academy_core::ClassCatalogStore;
use academy_domain::{ClassCatalog, ClassCatalogEntry, Result as DomainResult, Subject};
use async_trait::async_trait;
use rusqlite::params;
use tokio::task;
use tracing::{debug, warn};

use super::manager::{DbManager, SqliteConnection};
use crate::errors::conversions::{map_join_error, map_sql_error};

/// Reads active classes ordered by `position`, then insertion order.
pub struct SqliteClassCatalogRepository {
    db: Arc<DbManager>,
}

impl SqliteClassCatalogRepository {
    /// Create a new repository with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClassCatalogStore for SqliteClassCatalogRepository {
    async fn list_active_classes(&self) -> DomainResult<ClassCatalog> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<ClassCatalog> {
            let conn = db.get_connection()?;
            let rows = query_active_rows(&conn).map_err(map_sql_error)?;
            let catalog: ClassCatalog = rows.into_iter().filter_map(into_entry).collect();
            debug!(classes = catalog.len(), "class catalog loaded");
            Ok(catalog)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn query_active_rows(conn: &SqliteConnection) -> rusqlite::Result<Vec<(String, Option<String>)>> {
    let mut stmt = conn.prepare(
        "SELECT class_name, subject FROM classes
         WHERE is_active = 1
         ORDER BY position, rowid",
    )?;
    let rows = stmt.query_map(params![], |row| Ok((row.get(0)?, row.get(1)?)))?;
    rows.collect()
}

/// Classes without a subject belong to math, like enrollments.
fn into_entry((class_name, subject): (String, Option<String>)) -> Option<ClassCatalogEntry> {
    let subject = match subject.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Subject::default(),
        Some(raw) => match raw.parse::<Subject>() {
            Ok(subject) => subject,
            Err(err) => {
                warn!(class_name, error = %err, "skipping class with unknown subject");
                return None;
            }
        },
    };
    Some(ClassCatalogEntry::new(subject, class_name))
}
