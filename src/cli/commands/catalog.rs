//! Catalog command handler

use matric_pulse::core::catalog::{SA_LANGUAGES, SUBJECT_OPTIONS};

/// Print the recognized subjects, or the supported languages
pub fn run(languages: bool) {
    let items: &[&str] = if languages {
        &SA_LANGUAGES
    } else {
        &SUBJECT_OPTIONS
    };
    for item in items {
        println!("{item}");
    }
}
