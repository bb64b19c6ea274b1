//! Conversions from external infrastructure errors into domain errors.

use academy_domain::AcademyError;
use rusqlite::Error as SqlError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AcademyError);

impl From<InfraError> for AcademyError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AcademyError> for InfraError {
    fn from(value: AcademyError) -> Self {
        InfraError(value)
    }
}

trait IntoAcademyError {
    fn into_academy(self) -> AcademyError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → AcademyError */
/* -------------------------------------------------------------------------- */

impl IntoAcademyError for SqlError {
    fn into_academy(self) -> AcademyError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => AcademyError::Database("database is busy".into()),
                    (ErrorCode::DatabaseLocked, _) => {
                        AcademyError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        AcademyError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        AcademyError::Database("foreign key constraint violation".into())
                    }
                    _ => AcademyError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => AcademyError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                AcademyError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                AcademyError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => AcademyError::Database("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidPath(path) => AcademyError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => AcademyError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_academy())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → AcademyError */
/* -------------------------------------------------------------------------- */

impl IntoAcademyError for r2d2::Error {
    fn into_academy(self) -> AcademyError {
        AcademyError::Database(format!("connection pool error: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_academy())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → AcademyError */
/* -------------------------------------------------------------------------- */

impl IntoAcademyError for JoinError {
    fn into_academy(self) -> AcademyError {
        if self.is_cancelled() {
            AcademyError::Internal("blocking task cancelled".into())
        } else {
            AcademyError::Internal(format!("blocking task failed: {self}"))
        }
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(value.into_academy())
    }
}

/// Map a rusqlite error straight to the domain error.
pub(crate) fn map_sql_error(err: SqlError) -> AcademyError {
    InfraError::from(err).into()
}

/// Map a `spawn_blocking` join failure to the domain error.
pub(crate) fn map_join_error(err: JoinError) -> AcademyError {
    InfraError::from(err).into()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
