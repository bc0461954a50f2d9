//! Caller-held subject sheet
//!
//! The sheet is the editable list of subject rows a front end keeps between
//! interactions. It is plain owned state: the caller passes it around and
//! hands [`SubjectSheet::entries`] to the scoring engine when asked to score.

use super::subject::{clamp_percent, SubjectEntry};
use thiserror::Error;

/// Maximum number of subject rows a sheet accepts
pub const MAX_SUBJECT_ROWS: usize = 12;

/// Subjects pre-filled on a fresh sheet
const STARTER_SUBJECTS: [&str; 4] = [
    "English Home Language",
    "Mathematics",
    "Life Orientation",
    "Physical Sciences",
];

/// Errors raised when editing a sheet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// The sheet already holds [`MAX_SUBJECT_ROWS`] rows
    #[error("a sheet holds at most {MAX_SUBJECT_ROWS} subjects")]
    Full,
    /// Removing the row would leave the sheet empty
    #[error("a sheet must keep at least one subject row")]
    LastRow,
    /// No row carries the given id
    #[error("no subject row with id {0}")]
    UnknownRow(u32),
}

/// One editable row of the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// Stable row identifier, unique within the sheet
    pub id: u32,
    /// Current subject name and mark
    pub entry: SubjectEntry,
}

/// Ordered, bounded list of subject rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSheet {
    rows: Vec<SheetRow>,
    next_id: u32,
}

impl Default for SubjectSheet {
    fn default() -> Self {
        Self::starter()
    }
}

impl SubjectSheet {
    /// A sheet pre-filled with the compulsory subjects at 0%
    #[must_use]
    pub fn starter() -> Self {
        let mut sheet = Self {
            rows: Vec::with_capacity(MAX_SUBJECT_ROWS),
            next_id: 1,
        };
        for name in STARTER_SUBJECTS {
            sheet.push_row(SubjectEntry::new(name.to_string(), 0));
        }
        sheet
    }

    fn push_row(&mut self, entry: SubjectEntry) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(SheetRow { id, entry });
        id
    }

    fn row_mut(&mut self, id: u32) -> Result<&mut SheetRow, SheetError> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(SheetError::UnknownRow(id))
    }

    /// Rows in display order
    #[must_use]
    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for sheets built through the public API
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append an empty row and return its id
    ///
    /// # Errors
    /// Returns [`SheetError::Full`] once the sheet holds [`MAX_SUBJECT_ROWS`] rows.
    pub fn add_blank(&mut self) -> Result<u32, SheetError> {
        if self.rows.len() >= MAX_SUBJECT_ROWS {
            return Err(SheetError::Full);
        }
        Ok(self.push_row(SubjectEntry::new(String::new(), 0)))
    }

    /// Remove a row
    ///
    /// # Errors
    /// Returns [`SheetError::LastRow`] when only one row remains, or
    /// [`SheetError::UnknownRow`] when `id` is not on the sheet.
    pub fn remove(&mut self, id: u32) -> Result<(), SheetError> {
        let idx = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(SheetError::UnknownRow(id))?;
        if self.rows.len() == 1 {
            return Err(SheetError::LastRow);
        }
        self.rows.remove(idx);
        Ok(())
    }

    /// Rename the subject on a row
    ///
    /// # Errors
    /// Returns [`SheetError::UnknownRow`] when `id` is not on the sheet.
    pub fn set_name(&mut self, id: u32, name: &str) -> Result<(), SheetError> {
        self.row_mut(id)?.entry.name = name.to_string();
        Ok(())
    }

    /// Set the mark on a row, clamping it to `0..=100`
    ///
    /// # Errors
    /// Returns [`SheetError::UnknownRow`] when `id` is not on the sheet.
    pub fn set_percent(&mut self, id: u32, raw_percent: i64) -> Result<(), SheetError> {
        self.row_mut(id)?.entry.percent = clamp_percent(raw_percent);
        Ok(())
    }

    /// Snapshot of the rows as engine input, in display order
    #[must_use]
    pub fn entries(&self) -> Vec<SubjectEntry> {
        self.rows.iter().map(|row| row.entry.clone()).collect()
    }
}
