//! Subject mark input parsing
//!
//! Turns user-supplied text into [`SubjectEntry`] values. This is the input
//! boundary: percentages are clamped to `0..=100` here, so the scoring
//! engine never has to re-validate them.
//!
//! Two forms are accepted:
//! - files with one `name,percent` pair per line (an optional
//!   `subject,percent` header, blank lines and `#` comments are skipped)
//! - single `Name=NN` arguments from the command line

use crate::core::catalog::canonical_subject;
use crate::core::models::subject::clamp_percent;
use crate::core::models::SubjectEntry;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading subject marks
#[derive(Debug, Error)]
pub enum InputError {
    /// The subject file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed to load
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// A line or argument has no percentage part
    #[error("line {line}: expected `subject,percent` or `subject=percent`, got '{text}'")]
    MissingPercent {
        /// 1-based line number (1 for command-line arguments)
        line: usize,
        /// Offending text
        text: String,
    },
    /// The percentage part is not a number
    #[error("line {line}: '{value}' is not a percentage")]
    InvalidPercent {
        /// 1-based line number (1 for command-line arguments)
        line: usize,
        /// Offending value
        value: String,
    },
}

/// Parse a percentage as typed by a student.
///
/// Decimals are truncated toward zero; the result is clamped to `0..=100`.
/// Returns `None` for text that is not a number.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_percent(text: &str) -> Option<u8> {
    let trimmed = text.trim().trim_end_matches('%').trim_end();
    if let Ok(whole) = trimmed.parse::<i64>() {
        return Some(clamp_percent(whole));
    }
    let value = trimmed.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(clamp_percent(value.trunc() as i64))
}

/// Normalize a subject name: trim it, and use the catalog spelling when it matches one
#[must_use]
pub fn normalize_subject_name(name: &str) -> String {
    canonical_subject(name).map_or_else(|| name.trim().to_string(), str::to_string)
}

fn parse_pair(text: &str, separator: char, line: usize) -> Result<SubjectEntry, InputError> {
    let (name, percent) = text
        .rsplit_once(separator)
        .ok_or_else(|| InputError::MissingPercent {
            line,
            text: text.to_string(),
        })?;

    let percent = parse_percent(percent).ok_or_else(|| InputError::InvalidPercent {
        line,
        value: percent.trim().to_string(),
    })?;

    Ok(SubjectEntry::new(normalize_subject_name(name), percent))
}

/// Parse a `Name=NN` command-line argument
///
/// # Errors
/// Returns an error if the `=` is missing or the percentage is not a number.
pub fn parse_subject_arg(arg: &str) -> Result<SubjectEntry, InputError> {
    parse_pair(arg, '=', 1)
}

fn is_header(line: &str) -> bool {
    line.split(',')
        .next()
        .is_some_and(|first| matches!(first.trim().to_lowercase().as_str(), "subject" | "name"))
}

/// Parse subject marks from CSV-style text
///
/// # Errors
/// Returns the first malformed line as an [`InputError`].
pub fn parse_subject_csv(content: &str) -> Result<Vec<SubjectEntry>, InputError> {
    let mut entries = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if entries.is_empty() && is_header(line) {
            continue;
        }
        entries.push(parse_pair(line, ',', idx + 1)?);
    }

    Ok(entries)
}

/// Load subject marks from a CSV file
///
/// # Errors
/// Returns an error if the file cannot be read or contains a malformed line.
pub fn load_subject_file<P: AsRef<Path>>(path: P) -> Result<Vec<SubjectEntry>, InputError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_subject_csv(&content)
}
