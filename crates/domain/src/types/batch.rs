//! Partial-success reporting for batch operations.

use serde::{Deserialize, Serialize};

use crate::AcademyError;

/// A batch item that was skipped or failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItemError {
    /// Item key, e.g. `student/enrollment`.
    pub item: String,
    pub error: AcademyError,
}

/// Result of a batch of independent writes.
///
/// Batches never roll back: `applied` items stay applied even when later items
/// fail or the batch is cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub attempted: usize,
    pub applied: usize,
    /// Items whose target no longer exists or whose input was invalid.
    pub skipped: Vec<BatchItemError>,
    /// Items whose write failed.
    pub failed: Vec<BatchItemError>,
    pub cancelled: bool,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_applied(&mut self) {
        self.attempted += 1;
        self.applied += 1;
    }

    /// Item processed with nothing to write.
    pub fn record_unchanged(&mut self) {
        self.attempted += 1;
    }

    /// Classify `error` as skipped or failed.
    pub fn record_error(&mut self, item: impl Into<String>, error: AcademyError) {
        self.attempted += 1;
        let entry = BatchItemError { item: item.into(), error };
        if entry.error.is_skippable() {
            self.skipped.push(entry);
        } else {
            self.failed.push(entry);
        }
    }

    pub fn fixed(&self) -> usize {
        self.applied
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Every attempted item applied and nothing was cut short.
    pub fn is_complete_success(&self) -> bool {
        !self.cancelled && self.failed.is_empty() && self.skipped.is_empty()
    }
}
