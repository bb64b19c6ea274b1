//! Application context - dependency injection container

use std::sync::Arc;

use academy_core::{
    ClassCatalogStore, EnrollmentStore, EnrollmentSyncService, StatusSyncService, StudentStore,
};
use academy_domain::{AcademyError, Config, Result};
use academy_infra::{
    config, DbManager, SqliteClassCatalogRepository, SqliteEnrollmentRepository,
    SqliteStudentRepository,
};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub enrollments: Arc<dyn EnrollmentStore>,
    pub students: Arc<dyn StudentStore>,
    pub classes: Arc<dyn ClassCatalogStore>,

    // Services
    pub enrollment_sync: Arc<EnrollmentSyncService>,
    pub status_sync: Arc<StatusSyncService>,
}

impl AppContext {
    /// Create a new application context from the environment or a probed
    /// config file.
    pub async fn new() -> Result<Self> {
        let config = config::load()?;
        Self::new_with_config(config).await
    }

    /// Create a new application context with custom configuration
    ///
    /// Tests use this to point the context at a temporary database.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let db_path = config.database.path.clone();
        let pool_size = config.database.pool_size;
        let db = tokio::task::spawn_blocking(move || {
            let db = DbManager::new(&db_path, pool_size)?;
            db.run_migrations()?;
            Ok::<_, AcademyError>(db)
        })
        .await
        .map_err(|e| AcademyError::Internal(format!("database setup task failed: {e}")))??;
        let db = Arc::new(db);

        let enrollments: Arc<dyn EnrollmentStore> =
            Arc::new(SqliteEnrollmentRepository::new(Arc::clone(&db)));
        let students: Arc<dyn StudentStore> =
            Arc::new(SqliteStudentRepository::new(Arc::clone(&db)));
        let classes: Arc<dyn ClassCatalogStore> =
            Arc::new(SqliteClassCatalogRepository::new(Arc::clone(&db)));

        let lookup_batch_size = config.reconciliation.lookup_batch_size;
        let enrollment_sync = Arc::new(
            EnrollmentSyncService::new(
                Arc::clone(&enrollments),
                Arc::clone(&classes),
                Arc::clone(&students),
            )
            .with_lookup_batch_size(lookup_batch_size),
        );
        let status_sync = Arc::new(
            StatusSyncService::new(Arc::clone(&enrollments), Arc::clone(&students))
                .with_lookup_batch_size(lookup_batch_size),
        );

        tracing::info!(
            db_path = %db.path().display(),
            pool_size,
            lookup_batch_size,
            "application context initialized"
        );

        Ok(Self { config, db, enrollments, students, classes, enrollment_sync, status_sync })
    }

    /// Report the health of the context's components.
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new()
            .add_component(self.check_database_health().await)
            .add_component(self.check_catalog_health().await);

        status.calculate_score();
        status
    }

    /// Check database health by running a trivial query off the runtime.
    async fn check_database_health(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "database health check failed");
                ComponentHealth::unhealthy("database", format!("query failed: {e}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "database health check task panicked");
                ComponentHealth::unhealthy("database", format!("task panic: {e}"))
            }
        }
    }

    /// An empty active catalog makes every enrollment a mismatch.
    async fn check_catalog_health(&self) -> ComponentHealth {
        match self.classes.list_active_classes().await {
            Ok(catalog) if catalog.is_empty() => {
                ComponentHealth::unhealthy("class_catalog", "no active classes")
            }
            Ok(_) => ComponentHealth::healthy("class_catalog"),
            Err(e) => ComponentHealth::unhealthy("class_catalog", e.to_string()),
        }
    }
}
