//! Subject entry model

use serde::{Deserialize, Serialize};

/// Highest percentage a subject mark can carry
pub const MAX_PERCENT: u8 = 100;

/// A single subject mark as entered by the student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    /// Subject name (free text or one of the catalog names, e.g. "Mathematics")
    pub name: String,

    /// Achieved mark in percent.
    ///
    /// Callers are expected to keep this in `0..=100`; use [`SubjectEntry::clamped`]
    /// at the input boundary. The scoring engine does not re-validate the range.
    pub percent: u8,
}

impl SubjectEntry {
    /// Create a subject entry from an already-validated percentage
    #[must_use]
    pub const fn new(name: String, percent: u8) -> Self {
        Self { name, percent }
    }

    /// Create a subject entry from raw user input, clamping the mark to `0..=100`
    ///
    /// # Examples
    /// ```
    /// use matric_pulse::core::models::SubjectEntry;
    ///
    /// assert_eq!(SubjectEntry::clamped("Mathematics", 140).percent, 100);
    /// assert_eq!(SubjectEntry::clamped("History", -5).percent, 0);
    /// ```
    #[must_use]
    pub fn clamped(name: impl Into<String>, raw_percent: i64) -> Self {
        Self {
            name: name.into(),
            percent: clamp_percent(raw_percent),
        }
    }

    /// Whether this entry takes part in scoring.
    ///
    /// Entries with an empty name or a 0% mark count as "not yet entered".
    #[must_use]
    pub fn is_scorable(&self) -> bool {
        !self.name.is_empty() && self.percent > 0
    }
}

/// Clamp a raw percentage into `0..=100`
#[must_use]
pub fn clamp_percent(raw: i64) -> u8 {
    u8::try_from(raw.clamp(0, i64::from(MAX_PERCENT))).unwrap_or(MAX_PERCENT)
}
