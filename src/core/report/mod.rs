//! Report generation for APS results
//!
//! Renders a computed [`ApsResult`] as plain text, Markdown, or JSON. The
//! JSON form is the engine's external output contract
//! (`totalScore`, `breakdown[]`, `subjects[]`).

pub mod formats;

use crate::core::models::{ApsResult, SubjectEntry};
use crate::core::scoring::ScoringRules;
use std::error::Error;
use std::path::Path;

pub use formats::{JsonReporter, MarkdownReporter, ReportFormat, TextReporter};

/// One printable line of the score breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow<'a> {
    /// Subject name
    pub subject: &'a str,
    /// Mark the student entered
    pub percent: u8,
    /// Points counted towards the total
    pub points: u8,
    /// Whether this is the capped subject's contribution
    pub capped: bool,
}

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Computed result
    pub result: &'a ApsResult,
    /// Rules the result was computed with
    pub rules: &'a ScoringRules,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(result: &'a ApsResult, rules: &'a ScoringRules) -> Self {
        Self { result, rules }
    }

    fn capped_index(&self) -> Option<usize> {
        self.result
            .subjects
            .iter()
            .position(|s| self.rules.is_capped_subject(&s.name))
    }

    /// Breakdown rows paired with the marks they came from
    ///
    /// Duplicate subject names are matched to entries in input order. The
    /// result may be deserialized rather than computed, so a breakdown that
    /// does not line up with `subjects` yields rows with a 0% mark instead
    /// of failing.
    #[must_use]
    pub fn rows(&self) -> Vec<ReportRow<'a>> {
        let result: &'a ApsResult = self.result;
        let subjects: &'a [SubjectEntry] = &result.subjects;
        let capped_idx = self.capped_index();
        let mut used = vec![false; subjects.len()];
        let last_pos = result.breakdown.len().checked_sub(1);

        result
            .breakdown
            .iter()
            .enumerate()
            .map(|(pos, entry)| {
                // The capped contribution is always the final entry
                let capped = Some(pos) == last_pos
                    && capped_idx.is_some_and(|i| subjects[i].name == entry.subject_name);
                let idx = if capped {
                    capped_idx
                } else {
                    subjects.iter().enumerate().position(|(i, s)| {
                        !used[i] && Some(i) != capped_idx && s.name == entry.subject_name
                    })
                };
                if let Some(i) = idx {
                    used[i] = true;
                }
                ReportRow {
                    subject: &entry.subject_name,
                    percent: idx.map_or(0, |i| subjects[i].percent),
                    points: entry.points,
                    capped,
                }
            })
            .collect()
    }

    /// Valid subjects that did not make the top selection
    #[must_use]
    pub fn uncounted(&self) -> usize {
        self.result
            .subjects
            .len()
            .saturating_sub(self.result.breakdown.len())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Reporter for a given output format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Text => Box::new(TextReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
