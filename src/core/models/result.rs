//! APS result model

use super::SubjectEntry;
use serde::{Deserialize, Serialize};

/// Points contributed by one subject to the total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdownEntry {
    /// Name of the contributing subject
    pub subject_name: String,
    /// Points added to the total (0-7)
    pub points: u8,
}

impl ScoreBreakdownEntry {
    /// Create a breakdown entry
    #[must_use]
    pub const fn new(subject_name: String, points: u8) -> Self {
        Self {
            subject_name,
            points,
        }
    }
}

/// Output of the scoring engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApsResult {
    /// Sum of all contributing points
    pub total_score: u32,
    /// Contributing subjects: selected general subjects first, capped subject last
    pub breakdown: Vec<ScoreBreakdownEntry>,
    /// The valid entries that were considered, in input order
    pub subjects: Vec<SubjectEntry>,
}

impl ApsResult {
    /// Whether nothing was scored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Sum of the breakdown points; always equal to `total_score`
    #[must_use]
    pub fn breakdown_total(&self) -> u32 {
        self.breakdown.iter().map(|e| u32::from(e.points)).sum()
    }

    /// Look up the breakdown entry for a subject by exact name
    #[must_use]
    pub fn points_for(&self, subject_name: &str) -> Option<u8> {
        self.breakdown
            .iter()
            .find(|e| e.subject_name == subject_name)
            .map(|e| e.points)
    }
}
