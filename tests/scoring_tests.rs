//! Integration tests for APS scoring

use matric_pulse::core::models::SubjectEntry;
use matric_pulse::core::scoring::{compute_aps, points_for_percent, ScoringRules};

fn entry(name: &str, percent: u8) -> SubjectEntry {
    SubjectEntry::new(name.to_string(), percent)
}

fn grade12_marks() -> Vec<SubjectEntry> {
    vec![
        entry("English Home Language", 78),
        entry("Mathematics", 91),
        entry("Life Orientation", 85),
        entry("Physical Sciences", 55),
        entry("Life Sciences", 40),
        entry("Geography", 62),
        entry("History", 35),
    ]
}

fn breakdown_pairs(subjects: &[SubjectEntry]) -> Vec<(String, u8)> {
    compute_aps(subjects)
        .breakdown
        .into_iter()
        .map(|e| (e.subject_name, e.points))
        .collect()
}

#[test]
fn test_full_grade12_sheet() {
    let result = compute_aps(&grade12_marks());

    assert_eq!(result.total_score, 30);
    let names: Vec<&str> = result
        .breakdown
        .iter()
        .map(|e| e.subject_name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "Mathematics",
            "English Home Language",
            "Geography",
            "Physical Sciences",
            "Life Sciences",
            "History",
            "Life Orientation",
        ]
    );
    assert_eq!(result.points_for("Life Orientation"), Some(3));
    assert_eq!(result.subjects, grade12_marks());
}

#[test]
fn test_empty_input_scores_zero() {
    let result = compute_aps(&[]);
    assert_eq!(result.total_score, 0);
    assert!(result.breakdown.is_empty());
    assert!(result.subjects.is_empty());
}

#[test]
fn test_unfilled_rows_are_ignored() {
    let result = compute_aps(&[
        entry("", 80),
        entry("Mathematics", 0),
        entry("History", 55),
    ]);
    assert_eq!(result.total_score, 4);
    assert_eq!(result.subjects, vec![entry("History", 55)]);
    assert_eq!(result.breakdown.len(), 1);
}

#[test]
fn test_only_capped_subject_with_zero_mark_is_dropped() {
    let result = compute_aps(&[entry("Life Orientation", 0)]);
    assert_eq!(result.total_score, 0);
    assert!(result.breakdown.is_empty());
}

#[test]
fn test_capped_subject_contribution() {
    assert_eq!(compute_aps(&[entry("Life Orientation", 88)]).total_score, 3);
    assert_eq!(compute_aps(&[entry("Life Orientation", 65)]).total_score, 2);
    assert_eq!(compute_aps(&[entry("Life Orientation", 45)]).total_score, 1);

    // A single point halves to zero but the subject is still listed
    let low = compute_aps(&[entry("Life Orientation", 12)]);
    assert_eq!(low.total_score, 0);
    assert_eq!(low.points_for("Life Orientation"), Some(0));
}

#[test]
fn test_capped_subject_name_is_case_insensitive_substring() {
    let result = compute_aps(&[entry("Mathematics", 70), entry("LIFE ORIENTATION (Gr 12)", 90)]);
    assert_eq!(result.total_score, 6 + 3);
    assert_eq!(
        result.breakdown.last().map(|e| e.subject_name.as_str()),
        Some("LIFE ORIENTATION (Gr 12)")
    );
}

#[test]
fn test_second_capped_entry_joins_general_pool() {
    let result = compute_aps(&[
        entry("Life Orientation", 90),
        entry("Life Orientation", 75),
        entry("History", 50),
    ]);
    // First match is capped; the second is scored like any other subject
    assert_eq!(result.total_score, 6 + 4 + 3);
    assert_eq!(result.breakdown.len(), 3);
    assert_eq!(result.breakdown[0].points, 6);
    assert_eq!(result.breakdown[2].points, 3);
}

#[test]
fn test_at_most_six_general_subjects_plus_capped() {
    let mut marks: Vec<SubjectEntry> = (0..10)
        .map(|i| entry(&format!("Subject {i}"), 50 + i * 5))
        .collect();
    marks.push(entry("Life Orientation", 100));

    let result = compute_aps(&marks);
    assert_eq!(result.breakdown.len(), 7);
    assert_eq!(result.subjects.len(), 11);
    assert!(result.breakdown[..6].iter().all(|e| e.points >= 6));
}

#[test]
fn test_total_matches_breakdown_and_stays_in_range() {
    let samples = [
        grade12_marks(),
        vec![entry("History", 1)],
        vec![entry("Mathematics", 100); 9],
        vec![entry("Life Orientation", 100), entry("Accounting", 100)],
    ];
    for subjects in &samples {
        let result = compute_aps(subjects);
        assert_eq!(result.total_score, result.breakdown_total());
        assert!(result.total_score <= 45);
        assert!(result.breakdown.iter().all(|e| e.points <= 7));
    }

    let best: Vec<SubjectEntry> = (0..6)
        .map(|i| entry(&format!("Subject {i}"), 100))
        .chain(std::iter::once(entry("Life Orientation", 100)))
        .collect();
    assert_eq!(compute_aps(&best).total_score, 45);
}

#[test]
fn test_recomputing_gives_same_result() {
    let marks = grade12_marks();
    assert_eq!(compute_aps(&marks), compute_aps(&marks));
}

#[test]
fn test_total_ignores_input_order() {
    let marks = grade12_marks();
    let mut reversed = marks.clone();
    reversed.reverse();
    let mut rotated = marks.clone();
    rotated.rotate_left(3);

    let total = compute_aps(&marks).total_score;
    assert_eq!(compute_aps(&reversed).total_score, total);
    assert_eq!(compute_aps(&rotated).total_score, total);
}

#[test]
fn test_equal_points_keep_input_order() {
    let pairs = breakdown_pairs(&[
        entry("Geography", 72),
        entry("History", 75),
        entry("Accounting", 79),
    ]);
    assert_eq!(
        pairs,
        [
            ("Geography".to_string(), 6),
            ("History".to_string(), 6),
            ("Accounting".to_string(), 6),
        ]
    );
}

#[test]
fn test_raising_a_mark_never_lowers_the_total() {
    let base = grade12_marks();
    let base_total = compute_aps(&base).total_score;
    for idx in 0..base.len() {
        let mut raised = base.clone();
        raised[idx].percent = raised[idx].percent.saturating_add(10).min(100);
        assert!(compute_aps(&raised).total_score >= base_total);
    }
}

#[test]
fn test_point_band_table() {
    let expected = [
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
    for (percent, points) in expected {
        assert_eq!(points_for_percent(percent), points, "{percent}%");
    }
}

#[test]
fn test_custom_rules() {
    let rules = ScoringRules {
        top_subjects: 2,
        capped_subject: "orientation".to_string(),
        capped_max: 1,
    };
    let result = rules.compute(&grade12_marks());
    assert_eq!(result.total_score, 7 + 6 + 1);
    assert_eq!(result.breakdown.len(), 3);
}
