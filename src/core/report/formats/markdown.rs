//! Markdown report generator
//!
//! Renders the score breakdown as a Markdown table. Renders well in GitHub,
//! GitLab, and VS Code previews.

use crate::core::get_version;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/aps_report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    ///
    /// Placeholders are filled in a single pass, so subject names that look
    /// like `{{placeholder}}` are copied through unchanged.
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        fill_template(MARKDOWN_TEMPLATE, |key| match key {
            "total_score" => Some(ctx.result.total_score.to_string()),
            "breakdown_rows" => Some(Self::generate_rows(ctx)),
            "notes" => Some(Self::generate_notes(ctx)),
            "top_subjects" => Some(ctx.rules.top_subjects.to_string()),
            "capped_note" => Some(format!(
                "Subjects matching \"{}\" contribute half their points, at most {}.",
                ctx.rules.capped_subject, ctx.rules.capped_max
            )),
            "version" => Some(get_version().to_string()),
            _ => None,
        })
    }

    fn generate_rows(ctx: &ReportContext) -> String {
        let rows = ctx.rows();
        if rows.is_empty() {
            return "| _No subjects entered_ | - | 0 |".to_string();
        }

        let mut table = String::new();
        for row in rows {
            let label = if row.capped {
                format!("{} (capped)", escape_cell(row.subject))
            } else {
                escape_cell(row.subject)
            };
            let _ = writeln!(table, "| {label} | {}% | {} |", row.percent, row.points);
        }
        table.truncate(table.trim_end().len());
        table
    }

    fn generate_notes(ctx: &ReportContext) -> String {
        match ctx.uncounted() {
            0 => String::new(),
            1 => "\n> 1 subject was not counted.\n".to_string(),
            n => format!("\n> {n} subjects were not counted.\n"),
        }
    }
}

/// Replace each `{{key}}` in `template` with `lookup(key)`
///
/// Unknown keys are left as written. Substituted text is never rescanned.
fn fill_template<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let key = &after_open[..end];
        match lookup(key) {
            Some(value) => output.push_str(&value),
            None => {
                output.push_str("{{");
                output.push_str(key);
                output.push_str("}}");
            }
        }
        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    output
}

/// Escape pipe characters so free-text subject names cannot break the table
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
