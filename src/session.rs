//! The interactive session: at most one README attached at a time.
//!
//! Detached, the main menu offers create / load / exit. Attached, every
//! round goes to the README's own menu until it asks to detach.

use crate::config::OutputSection;
use crate::readme::{Readme, ReadmeFlow};
use crate::sections::DocumentInfo;
use crate::store::Workbook;
use crate::terminal::{Menu, Terminal};
use anyhow::Result;
use tracing::{info, warn};

/// Whether the session loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainAction {
    Create,
    Load,
    Exit,
}

pub struct Session {
    terminal: Terminal,
    workbook: Box<dyn Workbook>,
    output: OutputSection,
    current: Option<Readme>,
}

impl Session {
    pub fn new(terminal: Terminal, workbook: Box<dyn Workbook>, output: OutputSection) -> Self {
        Self {
            terminal,
            workbook,
            output,
            current: None,
        }
    }

    /// Run menus until the user exits.
    pub fn start(&mut self) -> Result<()> {
        while self.main_menu()? == Flow::Continue {}
        info!("session ended");
        Ok(())
    }

    /// One round of whichever menu applies.
    pub fn main_menu(&mut self) -> Result<Flow> {
        if let Some(readme) = self.current.as_mut() {
            if readme.display_menu(&mut self.terminal, &self.output.file)? == ReadmeFlow::Detach {
                self.detach();
            }
            return Ok(Flow::Continue);
        }

        let menu = Menu::choice(
            "README Wizard",
            [
                ("Create New README File", MainAction::Create),
                ("Load Previous README File", MainAction::Load),
                ("Exit", MainAction::Exit),
            ],
        )?;
        match *self.terminal.choose(&menu)? {
            MainAction::Create => self.create_new_readme()?,
            MainAction::Load => self.list_readmes_to_load()?,
            MainAction::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Ask for a project name and attach a README with that title.
    ///
    /// A title that is already saved is loaded rather than shadowed.
    pub fn create_new_readme(&mut self) -> Result<()> {
        let answer = self.terminal.process_menu(&Menu::free_text("Project Name:"))?;
        let title = answer.trim().to_string();

        if self.workbook.contains(&title)? {
            self.terminal.clear()?;
            self.terminal
                .prompt(&format!("A README named '{title}' already exists, loading it."))?;
            return self.attach_saved(&title);
        }

        let sheet = self.workbook.open(&title)?;
        self.current = Some(Readme::new(self.document(&title), sheet));
        info!(title = %title, "created readme");
        Ok(())
    }

    /// Offer the saved READMEs and attach the chosen one.
    pub fn list_readmes_to_load(&mut self) -> Result<()> {
        let titles = self.workbook.titles()?;
        if titles.is_empty() {
            self.terminal.clear()?;
            self.terminal.warn("No saved READMEs found")?;
            return self.terminal.pause();
        }

        let menu = Menu::choice(
            "Which README would you like to load?",
            titles.iter().map(|t| (t.as_str(), Some(t.as_str()))).chain([("Return", None)]),
        )?;
        match *self.terminal.choose(&menu)? {
            Some(title) => self.attach_saved(title),
            None => Ok(()),
        }
    }

    /// Load `title` from the workbook and attach it.
    pub fn load_readme(&mut self, title: &str) -> Result<()> {
        let sheet = self.workbook.open(title)?;
        let readme = Readme::load(self.document(title), sheet)?;
        self.current = Some(readme);
        Ok(())
    }

    /// Drop the current README. Its rows stay in the workbook.
    pub fn detach(&mut self) {
        if let Some(readme) = self.current.take() {
            info!(title = readme.title(), "detached readme");
        }
    }

    pub fn current_readme(&self) -> Option<&Readme> {
        self.current.as_ref()
    }

    /// Load for the user, reporting a failure instead of ending the session.
    fn attach_saved(&mut self, title: &str) -> Result<()> {
        if let Err(err) = self.load_readme(title) {
            warn!(title, error = %err, "failed to load readme");
            self.terminal.warn(&format!("Unable to load '{title}': {err:#}"))?;
            self.terminal.pause()?;
        }
        Ok(())
    }

    fn document(&self, title: &str) -> DocumentInfo {
        DocumentInfo::new(title).with_image_base_path(self.output.image_base_path.clone())
    }
}
