//! JSON report generator
//!
//! Emits the result exactly as downstream consumers expect it:
//! `{"totalScore", "breakdown": [{"subjectName", "points"}], "subjects": [{"name", "percent"}]}`.

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut json = serde_json::to_string_pretty(ctx.result)?;
        json.push('\n');
        Ok(json)
    }
}
