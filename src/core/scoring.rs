//! Admission Point Score (APS) computation
//!
//! Converts subject percentages into the standardized APS used for
//! university admission decisions:
//!
//! 1. Entries with an empty name or a 0% mark are dropped.
//! 2. The first entry whose name contains the capped-subject marker
//!    (Life Orientation by default, matched case-insensitively) is set aside.
//!    Any further matching entries stay in the general pool.
//! 3. Every general-pool entry is converted to points with [`points_for_percent`].
//! 4. The pool is sorted by points, highest first. The sort is stable, so equal
//!    points keep their input order. The top six entries are kept.
//! 5. The capped subject contributes `min(3, points / 2)` and is always listed
//!    last in the breakdown, even when it contributes nothing.
//!
//! Computation is pure: no logging, no I/O, no shared state.

use crate::core::models::{ApsResult, ScoreBreakdownEntry, SubjectEntry};

/// One step of the percentage-to-points table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointBand {
    /// Inclusive lower bound of the band in percent
    pub min_percent: u8,
    /// Points awarded inside the band
    pub points: u8,
}

/// The NSC point bands, highest first. Anything below the last band scores 0.
pub const POINT_BANDS: [PointBand; 7] = [
    PointBand { min_percent: 80, points: 7 },
    PointBand { min_percent: 70, points: 6 },
    PointBand { min_percent: 60, points: 5 },
    PointBand { min_percent: 50, points: 4 },
    PointBand { min_percent: 40, points: 3 },
    PointBand { min_percent: 30, points: 2 },
    PointBand { min_percent: 1, points: 1 },
];

/// Number of general subjects counted towards the total
pub const DEFAULT_TOP_SUBJECTS: usize = 6;

/// Lower-cased marker identifying the capped subject
pub const DEFAULT_CAPPED_SUBJECT: &str = "life orientation";

/// Most points the capped subject may contribute
pub const DEFAULT_CAPPED_MAX: u8 = 3;

/// Convert a percentage to APS points (0-7)
///
/// Marks above 100 are not produced by the input boundary; if one slips
/// through it lands in the top band.
///
/// # Examples
/// ```
/// use matric_pulse::core::scoring::points_for_percent;
///
/// assert_eq!(points_for_percent(80), 7);
/// assert_eq!(points_for_percent(79), 6);
/// assert_eq!(points_for_percent(29), 1);
/// assert_eq!(points_for_percent(0), 0);
/// ```
#[must_use]
pub fn points_for_percent(percent: u8) -> u8 {
    POINT_BANDS
        .iter()
        .find(|band| percent >= band.min_percent)
        .map_or(0, |band| band.points)
}

/// Parameters of the APS calculation
///
/// [`ScoringRules::default`] is the standard NSC calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRules {
    /// How many general-pool subjects count towards the total
    pub top_subjects: usize,
    /// Substring that marks the capped subject (compared lower-cased)
    pub capped_subject: String,
    /// Ceiling on the capped subject's contribution
    pub capped_max: u8,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            top_subjects: DEFAULT_TOP_SUBJECTS,
            capped_subject: DEFAULT_CAPPED_SUBJECT.to_string(),
            capped_max: DEFAULT_CAPPED_MAX,
        }
    }
}

impl ScoringRules {
    /// Whether `name` denotes the capped subject (lower-case substring match)
    #[must_use]
    pub fn is_capped_subject(&self, name: &str) -> bool {
        let marker = self.capped_subject.to_lowercase();
        !marker.is_empty() && name.to_lowercase().contains(&marker)
    }

    /// Points the capped subject adds for a given mark: half its band points,
    /// rounded down, never more than `capped_max`
    #[must_use]
    pub fn capped_contribution(&self, percent: u8) -> u8 {
        (points_for_percent(percent) / 2).min(self.capped_max)
    }

    /// Compute the APS for a list of subject entries
    ///
    /// Never fails: invalid entries are filtered and an empty input yields an
    /// empty result with a total of 0.
    #[must_use]
    pub fn compute(&self, subjects: &[SubjectEntry]) -> ApsResult {
        let valid: Vec<SubjectEntry> = subjects
            .iter()
            .filter(|s| s.is_scorable())
            .cloned()
            .collect();

        let capped_idx = valid.iter().position(|s| self.is_capped_subject(&s.name));

        let mut breakdown: Vec<ScoreBreakdownEntry> = valid
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != capped_idx)
            .map(|(_, s)| ScoreBreakdownEntry::new(s.name.clone(), points_for_percent(s.percent)))
            .collect();

        // `sort_by` is stable: ties keep their input order
        breakdown.sort_by(|a, b| b.points.cmp(&a.points));
        breakdown.truncate(self.top_subjects);

        if let Some(capped) = capped_idx.map(|idx| &valid[idx]) {
            breakdown.push(ScoreBreakdownEntry::new(
                capped.name.clone(),
                self.capped_contribution(capped.percent),
            ));
        }

        let total_score = breakdown.iter().map(|e| u32::from(e.points)).sum();

        ApsResult {
            total_score,
            breakdown,
            subjects: valid,
        }
    }
}

/// Compute the APS with the standard rules
///
/// # Examples
/// ```
/// use matric_pulse::core::models::SubjectEntry;
/// use matric_pulse::core::scoring::compute_aps;
///
/// let result = compute_aps(&[
///     SubjectEntry::clamped("Mathematics", 91),
///     SubjectEntry::clamped("Life Orientation", 65),
/// ]);
/// assert_eq!(result.total_score, 7 + 2);
/// ```
#[must_use]
pub fn compute_aps(subjects: &[SubjectEntry]) -> ApsResult {
    ScoringRules::default().compute(subjects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, percent: u8) -> SubjectEntry {
        SubjectEntry::new(name.to_string(), percent)
    }

    #[test]
    fn test_band_boundaries() {
        let cases = [
            (100, 7),
            (80, 7),
            (79, 6),
            (70, 6),
            (69, 5),
            (60, 5),
            (59, 4),
            (50, 4),
            (49, 3),
            (40, 3),
            (39, 2),
            (30, 2),
            (29, 1),
            (1, 1),
            (0, 0),
        ];
        for (percent, points) in cases {
            assert_eq!(points_for_percent(percent), points, "{percent}%");
        }
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(points_for_percent(101), 7);
        assert_eq!(points_for_percent(u8::MAX), 7);
    }

    #[test]
    fn test_bands_are_monotonic() {
        let mut last = 0;
        for percent in 0..=100 {
            let points = points_for_percent(percent);
            assert!(points >= last);
            last = points;
        }
    }

    #[test]
    fn test_capped_contribution() {
        let rules = ScoringRules::default();
        assert_eq!(rules.capped_contribution(88), 3);
        assert_eq!(rules.capped_contribution(65), 2);
        assert_eq!(rules.capped_contribution(45), 1);
        assert_eq!(rules.capped_contribution(25), 0);
    }

    #[test]
    fn test_capped_max_applies() {
        let rules = ScoringRules {
            capped_max: 1,
            ..ScoringRules::default()
        };
        assert_eq!(rules.capped_contribution(95), 1);
    }

    #[test]
    fn test_capped_subject_matching() {
        let rules = ScoringRules::default();
        assert!(rules.is_capped_subject("Life Orientation"));
        assert!(rules.is_capped_subject("LIFE ORIENTATION (Gr 12)"));
        assert!(!rules.is_capped_subject("Life Sciences"));
        assert!(!rules.is_capped_subject("Orientation"));
    }

    #[test]
    fn test_empty_marker_matches_nothing() {
        let rules = ScoringRules {
            capped_subject: String::new(),
            ..ScoringRules::default()
        };
        assert!(!rules.is_capped_subject("Life Orientation"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compute_aps(&[]), ApsResult::default());
    }

    #[test]
    fn test_only_top_six_count() {
        let subjects: Vec<_> = (0..8).map(|i| entry(&format!("S{i}"), 90 - i * 10)).collect();
        let result = compute_aps(&subjects);
        assert_eq!(result.breakdown.len(), 6);
        assert_eq!(result.total_score, 7 + 7 + 6 + 5 + 4 + 3);
        assert_eq!(result.subjects.len(), 8);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let subjects = [
            entry("B", 55),
            entry("A", 85),
            entry("C", 52),
            entry("D", 58),
        ];
        let result = compute_aps(&subjects);
        let names: Vec<_> = result.breakdown.iter().map(|e| e.subject_name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_capped_subject_listed_last_even_at_zero() {
        let result = compute_aps(&[entry("Life Orientation", 20), entry("History", 45)]);
        assert_eq!(result.total_score, 3);
        let last = result.breakdown.last().unwrap();
        assert_eq!(last.subject_name, "Life Orientation");
        assert_eq!(last.points, 0);
    }

    #[test]
    fn test_custom_top_subjects() {
        let rules = ScoringRules {
            top_subjects: 2,
            ..ScoringRules::default()
        };
        let result = rules.compute(&[entry("A", 45), entry("B", 85), entry("C", 75)]);
        assert_eq!(result.total_score, 13);
    }
}
