#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use academy_domain::{Config, DatabaseConfig};
use academy_lib::context::AppContext;
use tempfile::TempDir;

/// Create an `AppContext` backed by a fresh database in a temporary
/// directory.
///
/// Returns both the context and temp directory to keep the directory alive.
pub async fn create_test_context() -> (AppContext, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temporary test directory");
    let db_path = temp_dir.path().join("academy.db");

    let config = Config {
        database: DatabaseConfig { path: db_path.to_string_lossy().to_string(), pool_size: 4 },
        ..Config::default()
    };

    let ctx = AppContext::new_with_config(config).await.expect("context should start");
    (ctx, temp_dir)
}

/// Context with a small catalog and two students.
///
/// `s1` has a misspelled math class and a held english class. `s2` is
/// withdrawn from everything.
pub async fn create_seeded_context() -> (AppContext, TempDir) {
    let (ctx, temp_dir) = create_test_context().await;
    let conn = ctx.db.get_connection().expect("connection should be available");
    conn.execute_batch(
        "INSERT INTO students (id, name, status) VALUES
            ('s1', 'Kim Minji', 'active'),
            ('s2', 'Lee Jun', 'active');

         INSERT INTO classes (id, class_name, subject, is_active, position) VALUES
            ('c1', '중등M 심화', 'math', 1, 1),
            ('c2', 'PRE-A', 'english', 1, 1);

         INSERT INTO enrollments (id, student_id, class_name, subject, on_hold, enrollment_date, withdrawal_date) VALUES
            ('e1', 's1', '중등M 심하', 'math', 0, '2024-03-01', NULL),
            ('e2', 's1', 'PRE-A', 'english', 1, '2024-03-01', NULL),
            ('e3', 's2', 'PRE-A', 'english', 0, '2024-03-01', '2024-12-31');",
    )
    .expect("seed data should insert");
    drop(conn);
    (ctx, temp_dir)
}
