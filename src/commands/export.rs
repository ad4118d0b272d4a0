use anyhow::Result;
use colored::Colorize;
use readme_wizard::config::Config;
use std::path::PathBuf;

pub fn execute(config: &Config, title: &str, output: Option<PathBuf>) -> Result<()> {
    let readme = super::load_saved(config, title)?;
    let path = output.unwrap_or_else(|| config.output.file.clone());

    if let Some(backup) = readme.output_to_file(&path)? {
        println!("  Previous file kept as {}", backup.display());
    }
    println!("{} {} -> {}", "✓".green(), title, path.display());
    Ok(())
}
