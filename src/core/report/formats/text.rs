//! Plain-text report generator for terminal output

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Plain-text report generator
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let rows = ctx.rows();
        let width = rows
            .iter()
            .map(|r| r.subject.chars().count() + if r.capped { 10 } else { 0 })
            .max()
            .unwrap_or(0)
            .max("Subject".len());

        let mut out = String::new();
        writeln!(out, "APS: {}", ctx.result.total_score)?;
        if rows.is_empty() {
            writeln!(out, "No subjects entered.")?;
            return Ok(out);
        }

        writeln!(out)?;
        writeln!(out, "  {:<width$}  {:>5}  {:>6}", "Subject", "Mark", "Points")?;
        for row in &rows {
            let label = if row.capped {
                format!("{} (capped)", row.subject)
            } else {
                row.subject.to_string()
            };
            writeln!(out, "  {label:<width$}  {:>4}%  {:>6}", row.percent, row.points)?;
        }

        match ctx.uncounted() {
            0 => {}
            1 => writeln!(out, "\n1 subject was not counted.")?,
            n => writeln!(out, "\n{n} subjects were not counted.")?,
        }

        Ok(out)
    }
}
