//! SQLite-backed workbook.
//!
//! Layout:
//! - `worksheets(title, created_at)` - one row per saved README
//! - `rows(worksheet, row_num, section_type, data_type, value)` - the cells
//!
//! The connection is shared between the workbook and every worksheet it hands
//! out; the wizard is single-threaded so `Rc` is enough.

use super::{Column, Record, RowId, Workbook, Worksheet};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::rc::Rc;
use tracing::info;

pub struct SqliteWorkbook {
    conn: Rc<Connection>,
}

impl SqliteWorkbook {
    /// Open or create the workbook database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path).context("Failed to open SQLite database")?;
        Self::init_schema(&conn)?;
        info!(path = %path.display(), "opened workbook");

        Ok(Self {
            conn: Rc::new(conn),
        })
    }

    /// Create an in-memory workbook for testing
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Rc::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS worksheets (
                title TEXT PRIMARY KEY,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS rows (
                worksheet TEXT NOT NULL REFERENCES worksheets(title),
                row_num INTEGER NOT NULL,
                section_type TEXT NOT NULL DEFAULT '',
                data_type TEXT NOT NULL DEFAULT '',
                value TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (worksheet, row_num)
            );",
        )
        .context("Failed to initialise workbook schema")?;
        Ok(())
    }

    /// Saved READMEs with their creation time, oldest first.
    pub fn listing(&self) -> Result<Vec<(String, DateTime<Utc>)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, created_at FROM worksheets ORDER BY created_at, title")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(title, created)| {
                let created = DateTime::parse_from_rfc3339(&created)
                    .with_context(|| format!("Bad timestamp for '{title}': {created}"))?
                    .with_timezone(&Utc);
                Ok((title, created))
            })
            .collect()
    }
}

impl Workbook for SqliteWorkbook {
    fn titles(&self) -> Result<Vec<String>> {
        Ok(self.listing()?.into_iter().map(|(title, _)| title).collect())
    }

    fn open(&mut self, title: &str) -> Result<Box<dyn Worksheet>> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO worksheets (title, created_at) VALUES (?1, ?2)",
                params![title, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("Failed to create worksheet '{title}'"))?;

        Ok(Box::new(SqliteWorksheet {
            conn: Rc::clone(&self.conn),
            title: title.to_string(),
        }))
    }
}

pub struct SqliteWorksheet {
    conn: Rc<Connection>,
    title: String,
}

impl Worksheet for SqliteWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    fn find_row(&self, section: &str, field: &str) -> Result<Option<RowId>> {
        let row = self
            .conn
            .query_row(
                "SELECT row_num FROM rows
                 WHERE worksheet = ?1 AND section_type = ?2 AND data_type = ?3
                 ORDER BY row_num LIMIT 1",
                params![self.title, section, field],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .context("Failed to look up row")?;
        Ok(row.map(RowId))
    }

    fn append_row(&mut self) -> Result<RowId> {
        let row_num: i64 = self
            .conn
            .query_row(
                "INSERT INTO rows (worksheet, row_num)
                 SELECT ?1, COALESCE(MAX(row_num), 0) + 1 FROM rows WHERE worksheet = ?1
                 RETURNING row_num",
                params![self.title],
                |row| row.get(0),
            )
            .with_context(|| format!("Failed to append row to '{}'", self.title))?;
        Ok(RowId(row_num))
    }

    fn update_cell(&mut self, row: RowId, column: Column, value: &str) -> Result<()> {
        let sql = match column {
            Column::SectionType => {
                "UPDATE rows SET section_type = ?3 WHERE worksheet = ?1 AND row_num = ?2"
            }
            Column::DataType => {
                "UPDATE rows SET data_type = ?3 WHERE worksheet = ?1 AND row_num = ?2"
            }
            Column::Value => "UPDATE rows SET value = ?3 WHERE worksheet = ?1 AND row_num = ?2",
        };
        let changed = self
            .conn
            .execute(sql, params![self.title, row.0, value])
            .context("Failed to update cell")?;
        if changed == 0 {
            bail!("Row {} does not exist in worksheet '{}'", row.0, self.title);
        }
        Ok(())
    }

    fn records(&self) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(
            "SELECT section_type, data_type, value FROM rows
             WHERE worksheet = ?1 AND section_type != ''
             ORDER BY row_num",
        )?;
        let records = stmt
            .query_map(params![self.title], |row| {
                Ok(Record {
                    section_type: row.get(0)?,
                    data_type: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read rows of '{}'", self.title))?;
        Ok(records)
    }
}
