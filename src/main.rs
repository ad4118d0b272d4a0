use anyhow::Result;
use clap::{Parser, Subcommand};
use readme_wizard::config::Config;
use readme_wizard::logging;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Interactive wizard for composing project READMEs",
    long_about = None
)]
struct Cli {
    /// Config file (default: ~/.readme-wizard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database holding saved READMEs
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Never clear the screen between prompts
    #[arg(long, global = true)]
    no_clear: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved READMEs
    List {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print a saved README as Markdown
    Preview {
        /// README title
        title: String,
    },

    /// Write a saved README to a Markdown file
    Export {
        /// README title
        title: String,

        /// Output file (default: [output] file from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Config file values with command-line overrides applied.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(db) = &self.db {
            config.store.path = Some(db.clone());
        }
        if self.no_clear {
            config.terminal.clear_screen = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match cli.command {
        None => commands::interactive::execute(&config)?,
        Some(Commands::List { json }) => commands::list::execute(&config, json)?,
        Some(Commands::Preview { title }) => commands::preview::execute(&config, &title)?,
        Some(Commands::Export { title, output }) => {
            commands::export::execute(&config, &title, output)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply_over_file() -> Result<()> {
        let tmp = tempfile::TempDir::new()?;
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[store]\npath = \"/from/file.db\"\n")?;

        let cli = Cli::try_parse_from([
            "readme-wizard",
            "--config",
            config_path.to_str().unwrap(),
            "--db",
            "/from/flag.db",
            "--no-clear",
            "list",
        ])?;
        let config = cli.resolve_config()?;

        assert_eq!(config.database_path(), PathBuf::from("/from/flag.db"));
        assert!(!config.terminal.clear_screen);
        Ok(())
    }

    #[test]
    fn test_no_subcommand_is_interactive() -> Result<()> {
        let cli = Cli::try_parse_from(["readme-wizard"])?;
        assert!(cli.command.is_none());
        Ok(())
    }
}
