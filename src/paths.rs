//! Single source of truth for the wizard's filesystem layout.
//!
//! This module defines WHERE data lives. It has no I/O and no validation.
//!
//! ```text
//! ~/.readme-wizard/
//! ├── config.toml      # Optional settings
//! └── readmes.db       # Saved READMEs (SQLite workbook)
//!
//! ./Generated_README.md  # Default export target, relative to the cwd
//! ```

use std::path::PathBuf;

/// Default export file name.
pub const DEFAULT_OUTPUT_FILE: &str = "Generated_README.md";

/// The wizard's home directory: `~/.readme-wizard/`
pub fn wizard_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".readme-wizard")
}

/// Config file: `~/.readme-wizard/config.toml`
pub fn config_path() -> PathBuf {
    wizard_home().join("config.toml")
}

/// Saved READMEs: `~/.readme-wizard/readmes.db`
pub fn database_path() -> PathBuf {
    wizard_home().join("readmes.db")
}
