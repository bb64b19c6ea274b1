//! Shared test helpers for `academy-core` integration tests.
//!
//! In-memory stores with failure injection so service tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod stores;

use academy_domain::{Enrollment, Subject};
use chrono::NaiveDate;

/// Fixed "today" shared by status tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub fn enrollment(student_id: &str, id: &str, subject: Subject, class_name: &str) -> Enrollment {
    Enrollment::new(id, student_id, subject, class_name)
}
