//! Settings from `~/.readme-wizard/config.toml`.
//!
//! Every section and field is optional; a missing file means all defaults.
//!
//! ```toml
//! [store]
//! path = "/home/me/.readme-wizard/readmes.db"
//!
//! [output]
//! file = "Generated_README.md"
//! image_base_path = "assets/images"
//!
//! [terminal]
//! clear_screen = true
//! ```

use crate::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub terminal: TerminalSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    /// SQLite workbook; `paths::database_path()` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Where "Create Readme File" and `export` write.
    #[serde(default = "default_output_file")]
    pub file: PathBuf,
    /// Prefix for relative image files in the rendered Markdown.
    #[serde(default)]
    pub image_base_path: String,
}

fn default_output_file() -> PathBuf {
    PathBuf::from(paths::DEFAULT_OUTPUT_FILE)
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            image_base_path: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalSection {
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
}

fn default_clear_screen() -> bool {
    true
}

impl Default for TerminalSection {
    fn default() -> Self {
        Self {
            clear_screen: default_clear_screen(),
        }
    }
}

impl Config {
    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Load from `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Resolved database path.
    pub fn database_path(&self) -> PathBuf {
        self.store.path.clone().unwrap_or_else(paths::database_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let tmp = TempDir::new()?;
        let config = Config::load_from(&tmp.path().join("config.toml"))?;

        assert_eq!(config, Config::default());
        assert_eq!(config.output.file, PathBuf::from("Generated_README.md"));
        assert!(config.terminal.clear_screen);
        assert_eq!(config.database_path(), paths::database_path());
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[output]\nimage_base_path = \"assets/images\"\n")?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.output.image_base_path, "assets/images");
        assert_eq!(config.output.file, PathBuf::from("Generated_README.md"));
        assert!(config.terminal.clear_screen);
        Ok(())
    }

    #[test]
    fn test_full_file() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "[store]\npath = \"/tmp/r.db\"\n\n[output]\nfile = \"README.md\"\n\n[terminal]\nclear_screen = false\n",
        )?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.database_path(), PathBuf::from("/tmp/r.db"));
        assert_eq!(config.output.file, PathBuf::from("README.md"));
        assert!(!config.terminal.clear_screen);
        Ok(())
    }

    #[test]
    fn test_malformed_file_names_path() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[terminal]\nclear_screen = \"sometimes\"\n")?;

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
        Ok(())
    }

    #[test]
    fn test_serializes_back_to_toml() -> Result<()> {
        let text = toml::to_string_pretty(&Config::default())?;
        let parsed: Config = toml::from_str(&text)?;
        assert_eq!(parsed, Config::default());
        Ok(())
    }
}
