//! Class-name mismatch detection
//!
//! Finds enrollments whose free-text class name has no exact match in the
//! catalog for their subject, and proposes catalog names that were likely
//! intended:
//! - the catalog name contains the observed name, or
//! - the observed name contains the catalog name, or
//! - the two are within edit distance 3.
//!
//! Suggestions keep catalog order and are capped at five. Nothing here fails;
//! an empty catalog just produces empty suggestion lists.

use academy_domain::constants::{MAX_SUGGESTIONS, MAX_SUGGESTION_EDIT_DISTANCE};
use academy_domain::{
    ClassCatalog, Enrollment, EnrollmentDeletion, MismatchRecord, Subject,
};
use chrono::{DateTime, Utc};

use super::levenshtein::levenshtein;

/// Matches enrollment class names against one catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct NameMatcher<'a> {
    catalog: &'a ClassCatalog,
}

impl<'a> NameMatcher<'a> {
    pub fn new(catalog: &'a ClassCatalog) -> Self {
        Self { catalog }
    }

    /// Every enrollment (optionally limited to `subject_filter`) whose class
    /// name is set but not in the catalog for its subject, in input order.
    pub fn find_mismatches(
        &self,
        enrollments: &[Enrollment],
        subject_filter: Option<Subject>,
    ) -> Vec<MismatchRecord> {
        enrollments
            .iter()
            .filter(|e| subject_filter.map_or(true, |subject| e.subject == subject))
            .filter(|e| e.has_class_name())
            .filter(|e| !self.catalog.contains(e.subject, &e.class_name))
            .map(|e| MismatchRecord {
                enrollment: e.reference(),
                student_name: None,
                observed_class_name: e.class_name.clone(),
                subject: e.subject,
                suggested_matches: self.suggest(e.subject, &e.class_name),
            })
            .collect()
    }

    /// Catalog names for `subject` that plausibly mean `observed`.
    pub fn suggest(&self, subject: Subject, observed: &str) -> Vec<String> {
        self.catalog
            .names_for(subject)
            .iter()
            .filter(|name| is_plausible_match(name, observed))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}

fn is_plausible_match(candidate: &str, observed: &str) -> bool {
    candidate.contains(observed)
        || observed.contains(candidate)
        || levenshtein(candidate, observed) <= MAX_SUGGESTION_EDIT_DISTANCE
}

/// Mismatches of `enrollments` against `catalog`.
pub fn find_mismatches(
    enrollments: &[Enrollment],
    catalog: &ClassCatalog,
    subject_filter: Option<Subject>,
) -> Vec<MismatchRecord> {
    NameMatcher::new(catalog).find_mismatches(enrollments, subject_filter)
}

/// Copy of `enrollment` pointing at `new_class_name`, stamped with `now`.
pub fn apply_fix(enrollment: &Enrollment, new_class_name: &str, now: DateTime<Utc>) -> Enrollment {
    Enrollment {
        class_name: new_class_name.to_string(),
        updated_at: Some(now),
        ..enrollment.clone()
    }
}

/// Intent to remove `enrollment`; the caller's store performs the delete.
pub fn plan_deletion(enrollment: &Enrollment) -> EnrollmentDeletion {
    EnrollmentDeletion {
        enrollment: enrollment.reference(),
        observed_class_name: enrollment.class_name.clone(),
    }
}
