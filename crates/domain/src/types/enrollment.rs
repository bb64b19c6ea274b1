//! Enrollment value types and the document boundary they are validated at.
//!
//! Store adapters hand out [`EnrollmentDocument`]s, the loosely typed shape
//! the document store actually holds (camelCase keys, optional fields, legacy
//! `startDate` / `endDate` aliases). The engines only ever see [`Enrollment`],
//! produced by `Enrollment::try_from(document)`.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DOCUMENT_DATE_FORMAT;
use crate::{impl_domain_status_conversions, AcademyError, Result};

/// Subject an enrollment (and a catalog class) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// Documents without a subject are math enrollments.
    #[default]
    Math,
    English,
    Science,
    Korean,
    Other,
}

impl_domain_status_conversions!(Subject {
    Math => "math",
    English => "english",
    Science => "science",
    Korean => "korean",
    Other => "other",
});

/// Reference to one enrollment document scoped under its student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnrollmentRef {
    pub student_id: String,
    pub enrollment_id: String,
}

impl EnrollmentRef {
    pub fn new(student_id: impl Into<String>, enrollment_id: impl Into<String>) -> Self {
        Self { student_id: student_id.into(), enrollment_id: enrollment_id.into() }
    }
}

impl fmt::Display for EnrollmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.student_id, self.enrollment_id)
    }
}

/// One student's registration in one subject/class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    /// Free-text class reference. Not a foreign key; may go stale. Empty means
    /// the document carried no class name.
    pub class_name: String,
    pub subject: Subject,
    pub on_hold: bool,
    pub enrollment_date: Option<NaiveDate>,
    pub withdrawal_date: Option<NaiveDate>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    /// Live, not on hold, no dates. Mostly useful for fixtures and imports.
    pub fn new(
        id: impl Into<String>,
        student_id: impl Into<String>,
        subject: Subject,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            student_id: student_id.into(),
            class_name: class_name.into(),
            subject,
            on_hold: false,
            enrollment_date: None,
            withdrawal_date: None,
            updated_at: None,
        }
    }

    pub fn with_on_hold(mut self, on_hold: bool) -> Self {
        self.on_hold = on_hold;
        self
    }

    pub fn with_enrollment_date(mut self, date: NaiveDate) -> Self {
        self.enrollment_date = Some(date);
        self
    }

    pub fn with_withdrawal_date(mut self, date: NaiveDate) -> Self {
        self.withdrawal_date = Some(date);
        self
    }

    pub fn reference(&self) -> EnrollmentRef {
        EnrollmentRef::new(self.student_id.clone(), self.id.clone())
    }

    pub fn has_class_name(&self) -> bool {
        !self.class_name.is_empty()
    }

    /// A withdrawn enrollment is read but never influences the student's
    /// aggregate status.
    pub fn is_live(&self) -> bool {
        self.withdrawal_date.is_none()
    }

    /// Starts after `today`.
    pub fn is_scheduled(&self, today: NaiveDate) -> bool {
        self.enrollment_date.is_some_and(|date| date > today)
    }

    /// Stored hold flag combined with a future start date.
    pub fn effective_hold(&self, today: NaiveDate) -> bool {
        self.on_hold || self.is_scheduled(today)
    }
}

/// Enrollment as stored in the document store, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollmentDocument {
    pub id: String,
    pub student_id: String,
    pub class_name: Option<String>,
    pub subject: Option<String>,
    pub on_hold: Option<bool>,
    pub enrollment_date: Option<String>,
    /// Legacy alias of `enrollment_date`.
    pub start_date: Option<String>,
    pub withdrawal_date: Option<String>,
    /// Legacy alias of `withdrawal_date`; an end date counts as a withdrawal.
    pub end_date: Option<String>,
    pub updated_at: Option<String>,
}

impl TryFrom<EnrollmentDocument> for Enrollment {
    type Error = AcademyError;

    fn try_from(doc: EnrollmentDocument) -> Result<Self> {
        if doc.id.trim().is_empty() {
            return Err(AcademyError::InvalidInput("enrollment id is empty".into()));
        }
        if doc.student_id.trim().is_empty() {
            return Err(AcademyError::InvalidInput(format!(
                "enrollment {} has no student id",
                doc.id
            )));
        }

        let subject = match non_empty(doc.subject.as_deref()) {
            Some(raw) => raw.parse::<Subject>().map_err(|e| {
                AcademyError::InvalidInput(format!("enrollment {}: {e}", doc.id))
            })?,
            None => Subject::default(),
        };

        let enrollment_date = parse_document_date(
            &doc.id,
            "enrollmentDate",
            non_empty(doc.enrollment_date.as_deref()).or(non_empty(doc.start_date.as_deref())),
        )?;
        let withdrawal_date = parse_document_date(
            &doc.id,
            "withdrawalDate",
            non_empty(doc.withdrawal_date.as_deref()).or(non_empty(doc.end_date.as_deref())),
        )?;

        let updated_at = match non_empty(doc.updated_at.as_deref()) {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(raw)
                    .map_err(|e| {
                        AcademyError::InvalidInput(format!(
                            "enrollment {}: invalid updatedAt '{raw}': {e}",
                            doc.id
                        ))
                    })?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        Ok(Self {
            id: doc.id,
            student_id: doc.student_id,
            class_name: doc.class_name.unwrap_or_default(),
            subject,
            on_hold: doc.on_hold.unwrap_or(false),
            enrollment_date,
            withdrawal_date,
            updated_at,
        })
    }
}

impl From<&Enrollment> for EnrollmentDocument {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            id: enrollment.id.clone(),
            student_id: enrollment.student_id.clone(),
            class_name: Some(enrollment.class_name.clone()),
            subject: Some(enrollment.subject.to_string()),
            on_hold: Some(enrollment.on_hold),
            enrollment_date: enrollment.enrollment_date.map(format_document_date),
            start_date: None,
            withdrawal_date: enrollment.withdrawal_date.map(format_document_date),
            end_date: None,
            updated_at: enrollment.updated_at.map(|ts| ts.to_rfc3339()),
        }
    }
}

/// Format a date the way documents store it (`YYYY-MM-DD`).
pub fn format_document_date(date: NaiveDate) -> String {
    date.format(DOCUMENT_DATE_FORMAT).to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_document_date(id: &str, field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(|value| {
        NaiveDate::parse_from_str(value, DOCUMENT_DATE_FORMAT).map_err(|e| {
            AcademyError::InvalidInput(format!("enrollment {id}: invalid {field} '{value}': {e}"))
        })
    })
    .transpose()
}
