//! Data models for `MatricPulse`

pub mod result;
pub mod sheet;
pub mod subject;

pub use result::{ApsResult, ScoreBreakdownEntry};
pub use sheet::{SheetError, SheetRow, SubjectSheet, MAX_SUBJECT_ROWS};
pub use subject::SubjectEntry;
