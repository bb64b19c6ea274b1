//! Outputs of class-name reconciliation and the fix intents built from them.

use serde::{Deserialize, Serialize};

use super::enrollment::{EnrollmentRef, Subject};

/// An enrollment whose class name has no exact catalog match.
///
/// Derived fresh on every scan and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchRecord {
    pub enrollment: EnrollmentRef,
    /// Filled in by the scan service; the pure matcher leaves it empty.
    pub student_name: Option<String>,
    pub observed_class_name: String,
    pub subject: Subject,
    /// Up to five candidate names, in catalog order.
    pub suggested_matches: Vec<String>,
}

/// Replace an enrollment's class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNameFix {
    pub enrollment: EnrollmentRef,
    pub new_class_name: String,
}

impl ClassNameFix {
    pub fn new(enrollment: EnrollmentRef, new_class_name: impl Into<String>) -> Self {
        Self { enrollment, new_class_name: new_class_name.into() }
    }
}

/// Intent to remove an enrollment. The engine never deletes anything itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentDeletion {
    pub enrollment: EnrollmentRef,
    pub observed_class_name: String,
}
