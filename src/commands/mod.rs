//! Subcommand implementations. Each takes the resolved [`Config`].

pub mod export;
pub mod interactive;
pub mod list;
pub mod preview;

use anyhow::{bail, Result};
use readme_wizard::config::Config;
use readme_wizard::readme::Readme;
use readme_wizard::sections::DocumentInfo;
use readme_wizard::store::{SqliteWorkbook, Workbook};

/// Open the configured workbook.
fn open_workbook(config: &Config) -> Result<SqliteWorkbook> {
    SqliteWorkbook::open(config.database_path())
}

/// Load a saved README without creating one when `title` is unknown.
fn load_saved(config: &Config, title: &str) -> Result<Readme> {
    let mut workbook = open_workbook(config)?;
    if !workbook.contains(title)? {
        bail!("No saved README named '{title}'. Run `readme-wizard list` to see saved titles.");
    }
    let doc = DocumentInfo::new(title).with_image_base_path(config.output.image_base_path.clone());
    Readme::load(doc, workbook.open(title)?)
}
