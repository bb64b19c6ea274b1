//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the academy workspace
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AcademyError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AcademyError {
    /// Stable label suitable for logging fields and batch reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether a batch should skip the item and move on rather than count it
    /// as a failed write.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidInput(_))
    }
}

/// Result type alias for academy operations
pub type Result<T> = std::result::Result<T, AcademyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = AcademyError::NotFound("student s1".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "NotFound");
        assert_eq!(json["message"], "student s1");
    }

    #[test]
    fn only_not_found_and_validation_are_skippable() {
        assert!(AcademyError::NotFound("x".into()).is_skippable());
        assert!(AcademyError::InvalidInput("x".into()).is_skippable());
        assert!(!AcademyError::Database("x".into()).is_skippable());
        assert!(!AcademyError::Internal("x".into()).is_skippable());
    }
}
