//! Validation result buckets.

use serde::Serialize;

/// Diagnostics from one validation run, bucketed by severity.
///
/// Errors block a release, warnings should be fixed, notes are advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total diagnostic count across all buckets.
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strict mode: every warning and note becomes an error.
    pub fn into_strict(mut self) -> Self {
        self.errors.append(&mut self.warnings);
        self.errors.append(&mut self.notes);
        self
    }
}
