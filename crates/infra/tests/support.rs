#![allow(dead_code, clippy::expect_used)]

use std::sync::Arc;

use academy_infra::database::{
    DbManager, SqliteClassCatalogRepository, SqliteEnrollmentRepository, SqliteStudentRepository,
};
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a migrated temporary database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("academy.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("migrations should run");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }

    pub fn enrollments(&self) -> Arc<SqliteEnrollmentRepository> {
        Arc::new(SqliteEnrollmentRepository::new(Arc::clone(&self.manager)))
    }

    pub fn students(&self) -> Arc<SqliteStudentRepository> {
        Arc::new(SqliteStudentRepository::new(Arc::clone(&self.manager)))
    }

    pub fn classes(&self) -> Arc<SqliteClassCatalogRepository> {
        Arc::new(SqliteClassCatalogRepository::new(Arc::clone(&self.manager)))
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// A small academy: three students, a catalog, and enrollments with one
/// misspelled class name, one legacy-dated withdrawal and one future start.
pub fn seeded_academy() -> TestDatabase {
    let db = TestDatabase::new();
    db.execute_batch(
        "INSERT INTO students (id, name, status) VALUES
            ('s1', 'Kim Minji', 'on_hold'),
            ('s2', 'Lee Jun', NULL),
            ('s3', 'Park Seo', 'withdrawn');

         INSERT INTO classes (id, class_name, subject, is_active, position) VALUES
            ('c1', '중등M 심화', 'math', 1, 1),
            ('c2', '고등 미적분', 'math', 1, 2),
            ('c3', 'PRE-A', 'english', 1, 1),
            ('c4', '중등M 기초', 'math', 0, 3);

         INSERT INTO enrollments (id, student_id, class_name, subject, on_hold, enrollment_date, end_date) VALUES
            ('e1', 's1', '중등M 심하', 'math', 0, '2024-03-01', NULL),
            ('e2', 's1', 'PRE-A', 'english', 1, '2024-03-01', NULL),
            ('e3', 's2', '중등M 기초', NULL, 0, '2024-03-01', '2024-12-31'),
            ('e4', 's2', 'PRE-A', 'english', 0, '2999-01-01', NULL),
            ('e5', 's3', '고등 미적분', 'math', 0, '2024-03-01', NULL);",
    );
    db
}
