use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use readme_wizard::config::Config;
use serde_json::json;

pub fn execute(config: &Config, json: bool) -> Result<()> {
    let listing = super::open_workbook(config)?.listing()?;

    if json {
        let entries: Vec<_> = listing
            .iter()
            .map(|(title, created)| json!({ "title": title, "created_at": created.to_rfc3339() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if listing.is_empty() {
        println!("{}", "No saved READMEs found".yellow());
        return Ok(());
    }

    println!("Saved READMEs:");
    for (title, created) in &listing {
        let created = created.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        println!("  {} {}", title.green(), format!("(created {created})").dimmed());
    }
    Ok(())
}
