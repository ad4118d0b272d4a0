//! In-process workbook.
//!
//! Worksheets opened from a [`MemoryWorkbook`] share their rows with it, so a
//! README written through one handle can be loaded again through another, as
//! with the on-disk store.

use super::{Column, Record, RowId, Workbook, Worksheet};
use anyhow::{bail, Result};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Rows = Rc<RefCell<Vec<[String; 3]>>>;

#[derive(Debug, Default, Clone)]
pub struct MemoryWorkbook {
    sheets: Rc<RefCell<Vec<(String, Rows)>>>,
    updates: Rc<Cell<usize>>,
}

impl MemoryWorkbook {
    /// Number of `update_cell` calls made through any worksheet so far.
    pub fn cell_updates(&self) -> usize {
        self.updates.get()
    }

    /// Seed a worksheet with rows, as if written by an earlier session.
    pub fn insert(&mut self, title: &str, records: &[Record]) {
        let rows = self.rows_for(title);
        rows.borrow_mut().extend(records.iter().map(|r| {
            [r.section_type.clone(), r.data_type.clone(), r.value.clone()]
        }));
    }

    fn rows_for(&self, title: &str) -> Rows {
        let mut sheets = self.sheets.borrow_mut();
        if let Some((_, rows)) = sheets.iter().find(|(t, _)| t == title) {
            return Rc::clone(rows);
        }
        let rows = Rows::default();
        sheets.push((title.to_string(), Rc::clone(&rows)));
        rows
    }
}

impl Workbook for MemoryWorkbook {
    fn titles(&self) -> Result<Vec<String>> {
        Ok(self.sheets.borrow().iter().map(|(t, _)| t.clone()).collect())
    }

    fn open(&mut self, title: &str) -> Result<Box<dyn Worksheet>> {
        Ok(Box::new(MemoryWorksheet {
            title: title.to_string(),
            rows: self.rows_for(title),
            updates: Rc::clone(&self.updates),
        }))
    }
}

pub struct MemoryWorksheet {
    title: String,
    rows: Rows,
    updates: Rc<Cell<usize>>,
}

impl Worksheet for MemoryWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    fn find_row(&self, section: &str, field: &str) -> Result<Option<RowId>> {
        let rows = self.rows.borrow();
        Ok(rows
            .iter()
            .position(|r| r[0] == section && r[1] == field)
            .map(|i| RowId(i as i64 + 1)))
    }

    fn append_row(&mut self) -> Result<RowId> {
        let mut rows = self.rows.borrow_mut();
        rows.push(Default::default());
        Ok(RowId(rows.len() as i64))
    }

    fn update_cell(&mut self, row: RowId, column: Column, value: &str) -> Result<()> {
        let mut rows = self.rows.borrow_mut();
        let index = usize::try_from(row.0 - 1).ok();
        match index.and_then(|i| rows.get_mut(i)) {
            Some(cells) => cells[column.index() - 1] = value.to_string(),
            None => bail!("Row {} does not exist in worksheet '{}'", row.0, self.title),
        }
        self.updates.set(self.updates.get() + 1);
        Ok(())
    }

    fn records(&self) -> Result<Vec<Record>> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|r| !r[0].is_empty())
            .map(|[s, d, v]| Record::new(s.as_str(), d.as_str(), v.as_str()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worksheets_share_rows_with_workbook() -> Result<()> {
        let mut workbook = MemoryWorkbook::default();
        let mut first = workbook.open("Demo")?;
        let row = first.append_row()?;
        first.update_cell(row, Column::SectionType, "Introduction")?;

        let second = workbook.open("Demo")?;
        assert_eq!(second.records()?.len(), 1);
        assert_eq!(workbook.titles()?, vec!["Demo".to_string()]);
        assert_eq!(workbook.cell_updates(), 1);
        Ok(())
    }

    #[test]
    fn test_update_missing_row_fails() -> Result<()> {
        let mut workbook = MemoryWorkbook::default();
        let mut sheet = workbook.open("Demo")?;
        assert!(sheet.update_cell(RowId(4), Column::Value, "x").is_err());
        assert!(sheet.update_cell(RowId(0), Column::Value, "x").is_err());
        Ok(())
    }

    #[test]
    fn test_titles_keep_creation_order() -> Result<()> {
        let mut workbook = MemoryWorkbook::default();
        workbook.open("Zeta")?;
        workbook.open("Alpha")?;
        workbook.open("Zeta")?;
        assert_eq!(workbook.titles()?, vec!["Zeta", "Alpha"]);
        assert!(workbook.contains("Alpha")?);
        Ok(())
    }
}
