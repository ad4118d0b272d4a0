use anyhow::Result;
use readme_wizard::config::Config;

/// Print the rendered Markdown of a saved README to stdout.
pub fn execute(config: &Config, title: &str) -> Result<()> {
    let readme = super::load_saved(config, title)?;
    print!("{}", readme.output_raw());
    Ok(())
}
