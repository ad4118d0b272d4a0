//! Row store backing saved READMEs.
//!
//! The store is modelled on a spreadsheet workbook: one worksheet per README,
//! each row holding `(section type, data type, value)` in columns 1-3. Sections
//! talk to it only through [`write_field`] / [`clear_field`], which keep the
//! invariant that a `(section, field)` pair owns at most one row.
//!
//! Two implementations exist:
//! - [`SqliteWorkbook`] - the on-disk store used by the binary
//! - [`MemoryWorkbook`] - an in-process store for tests and throwaway sessions

pub mod memory;
pub mod sqlite;

pub use memory::{MemoryWorkbook, MemoryWorksheet};
pub use sqlite::{SqliteWorkbook, SqliteWorksheet};

use anyhow::Result;
use tracing::debug;

/// 1-based row number inside a worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub i64);

/// The three worksheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    SectionType = 1,
    DataType = 2,
    Value = 3,
}

impl Column {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One persisted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub section_type: String,
    pub data_type: String,
    pub value: String,
}

impl Record {
    pub fn new(
        section_type: impl Into<String>,
        data_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            section_type: section_type.into(),
            data_type: data_type.into(),
            value: value.into(),
        }
    }
}

/// A single README's rows.
pub trait Worksheet {
    /// Title of the README this worksheet belongs to.
    fn title(&self) -> &str;

    /// Row holding `field` of `section`, if one was written before.
    fn find_row(&self, section: &str, field: &str) -> Result<Option<RowId>>;

    /// Append an empty row and return its id.
    fn append_row(&mut self) -> Result<RowId>;

    fn update_cell(&mut self, row: RowId, column: Column, value: &str) -> Result<()>;

    /// Every populated row, in row order.
    fn records(&self) -> Result<Vec<Record>>;
}

/// The collection of saved READMEs.
pub trait Workbook {
    /// Titles of saved READMEs, oldest first.
    fn titles(&self) -> Result<Vec<String>>;

    /// Open the worksheet for `title`, creating it when missing.
    fn open(&mut self, title: &str) -> Result<Box<dyn Worksheet>>;

    fn contains(&self, title: &str) -> Result<bool> {
        Ok(self.titles()?.iter().any(|t| t == title))
    }
}

/// Write `value` for `field` of `section`.
///
/// Overwrites the value column of an existing row; otherwise appends a row
/// and fills all three columns.
pub fn write_field(
    sheet: &mut dyn Worksheet,
    section: &str,
    field: &str,
    value: &str,
) -> Result<()> {
    let row = match sheet.find_row(section, field)? {
        Some(row) => row,
        None => {
            let row = sheet.append_row()?;
            sheet.update_cell(row, Column::SectionType, section)?;
            sheet.update_cell(row, Column::DataType, field)?;
            row
        }
    };
    sheet.update_cell(row, Column::Value, value)?;
    debug!(sheet = sheet.title(), section, field, row = row.0, "wrote field");
    Ok(())
}

/// Blank the value of `field` if it was ever written. Never appends.
pub fn clear_field(sheet: &mut dyn Worksheet, section: &str, field: &str) -> Result<()> {
    if let Some(row) = sheet.find_row(section, field)? {
        sheet.update_cell(row, Column::Value, "")?;
        debug!(sheet = sheet.title(), section, field, row = row.0, "cleared field");
    }
    Ok(())
}
