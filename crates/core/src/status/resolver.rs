//! Enrollment status resolution
//!
//! Derives the aggregate status a student should carry from the set of their
//! subject enrollments. Pure: no store access, and "today" is fixed when the
//! resolver is built so a pass is deterministic.
//!
//! Order of the rules matters:
//! 1. sticky manual statuses (withdrawn, prospect, prospective) are kept
//! 2. withdrawn enrollments are dropped
//! 3. no live enrollments keeps the current status
//! 4. every live enrollment effectively on hold resolves to `on_hold`
//! 5. anything else resolves to `active`

use academy_domain::{Enrollment, ResolutionReason, StatusResolution, StudentStatus};
use chrono::{Local, NaiveDate};

/// Computes student status from an enrollment snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentStatusResolver {
    today: NaiveDate,
}

impl EnrollmentStatusResolver {
    /// Resolver that treats `today` as the current date.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Resolver for the local calendar date.
    pub fn for_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Status `previous` should become given `enrollments`.
    pub fn resolve(&self, enrollments: &[Enrollment], previous: StudentStatus) -> StatusResolution {
        if previous.is_sticky() {
            return StatusResolution::unchanged(previous, ResolutionReason::ManualStatusPreserved);
        }

        let mut live = enrollments.iter().filter(|e| e.is_live()).peekable();
        if live.peek().is_none() {
            return StatusResolution::unchanged(previous, ResolutionReason::NoLiveEnrollments);
        }

        let (candidate, reason) = if live.all(|e| e.effective_hold(self.today)) {
            (StudentStatus::OnHold, ResolutionReason::AllEnrollmentsOnHold)
        } else {
            (StudentStatus::Active, ResolutionReason::ActiveEnrollmentPresent)
        };

        if candidate == previous {
            return StatusResolution::unchanged(previous, ResolutionReason::StatusUnchanged);
        }

        StatusResolution::transition(previous, candidate, reason)
    }
}

impl Default for EnrollmentStatusResolver {
    fn default() -> Self {
        Self::for_today()
    }
}
