//! Recognized subject names and languages offered to front ends.
//!
//! The scoring engine accepts any subject name; this list only populates pickers.

/// NSC subjects offered in the subject picker
pub const SUBJECT_OPTIONS: [&str; 19] = [
    "English Home Language",
    "English First Additional",
    "Afrikaans Home Language",
    "Afrikaans First Additional",
    "Mathematics",
    "Mathematical Literacy",
    "Physical Sciences",
    "Life Sciences",
    "Accounting",
    "Business Studies",
    "Economics",
    "History",
    "Geography",
    "Life Orientation",
    "Information Technology",
    "Computer App Technology",
    "Tourism",
    "Visual Arts",
    "Dramatic Arts",
];

/// South African languages available for mentor conversations
pub const SA_LANGUAGES: [&str; 11] = [
    "English",
    "isiZulu",
    "isiXhosa",
    "Afrikaans",
    "Sepedi",
    "Setswana",
    "Sesotho",
    "Xitsonga",
    "siSwati",
    "Tshivenda",
    "isiNdebele",
];

/// Whether `name` is one of the catalog subjects (case-insensitive, trimmed)
#[must_use]
pub fn is_recognized_subject(name: &str) -> bool {
    canonical_subject(name).is_some()
}

/// Catalog spelling of `name`, if it is a recognized subject
#[must_use]
pub fn canonical_subject(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    SUBJECT_OPTIONS
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(needle))
}
