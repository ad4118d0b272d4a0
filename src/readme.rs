//! A README under construction: its sections, in the order they were added.

use crate::error::WizardError;
use crate::sections::{DocumentInfo, Section, SectionContext, SectionKind};
use crate::store::{Record, Worksheet};
use crate::terminal::{Menu, Terminal};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What the session should do after the README menu returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadmeFlow {
    Stay,
    Detach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadmeAction {
    AddSection,
    View,
    CreateFile,
    Return,
}

pub struct Readme {
    doc: DocumentInfo,
    sections: Vec<Box<dyn Section>>,
    sheet: Box<dyn Worksheet>,
}

impl Readme {
    /// An empty README backed by `sheet`.
    pub fn new(doc: DocumentInfo, sheet: Box<dyn Worksheet>) -> Self {
        Self {
            doc,
            sections: Vec::new(),
            sheet,
        }
    }

    /// Rebuild a README from the rows already in `sheet`.
    pub fn load(doc: DocumentInfo, sheet: Box<dyn Worksheet>) -> Result<Self> {
        let records = sheet
            .records()
            .with_context(|| format!("Failed to read README '{}'", doc.title))?;
        let mut readme = Self::new(doc, sheet);
        readme.load_sections(&records)?;
        info!(
            title = %readme.doc.title,
            sections = readme.sections.len(),
            rows = records.len(),
            "loaded readme"
        );
        Ok(readme)
    }

    pub fn title(&self) -> &str {
        &self.doc.title
    }

    pub fn doc(&self) -> &DocumentInfo {
        &self.doc
    }

    /// Sections in output order.
    pub fn sections(&self) -> impl Iterator<Item = &dyn Section> {
        self.sections.iter().map(|s| s.as_ref())
    }

    pub fn section(&self, kind: SectionKind) -> Option<&dyn Section> {
        self.sections().find(|s| s.kind() == kind)
    }

    /// One round of the README menu.
    pub fn display_menu(
        &mut self,
        terminal: &mut Terminal,
        output_file: &Path,
    ) -> Result<ReadmeFlow> {
        let menu = Menu::choice(
            format!("README: {}", self.doc.title),
            [
                ("Add Section", ReadmeAction::AddSection),
                ("View Readme", ReadmeAction::View),
                ("Create Readme File", ReadmeAction::CreateFile),
                ("Return to Main Menu", ReadmeAction::Return),
            ],
        )?;

        match *terminal.choose(&menu)? {
            ReadmeAction::AddSection => self.add_section(terminal)?,
            ReadmeAction::View => self.preview(terminal)?,
            ReadmeAction::CreateFile => {
                terminal.clear()?;
                match self.output_to_file(output_file) {
                    Ok(backup) => {
                        if let Some(backup) = backup {
                            terminal.say(
                                format!("Previous file kept as {}", backup.display()).yellow(),
                            )?;
                        }
                        terminal
                            .say(format!("README written to {}", output_file.display()).green())?;
                    }
                    Err(err) => {
                        warn!(
                            path = %output_file.display(),
                            error = %err,
                            "failed to write readme"
                        );
                        terminal.warn(&format!("Unable to write README: {err:#}"))?;
                    }
                }
                terminal.pause()?;
            }
            ReadmeAction::Return => return Ok(ReadmeFlow::Detach),
        }
        Ok(ReadmeFlow::Stay)
    }

    /// Ask which section to add, then open it.
    pub fn add_section(&mut self, terminal: &mut Terminal) -> Result<()> {
        let menu = Menu::choice(
            "Which section would you like to add?",
            SectionKind::ALL
                .into_iter()
                .map(|kind| (kind.header(), Some(kind)))
                .chain([("Return", None)]),
        )?;

        match *terminal.choose(&menu)? {
            Some(kind) => self.open_section(kind, terminal),
            None => Ok(()),
        }
    }

    /// Open `kind`'s menu, creating the section first if the README lacks it.
    ///
    /// An existing section is reopened in place: its data and its position
    /// are kept.
    pub fn open_section(&mut self, kind: SectionKind, terminal: &mut Terminal) -> Result<()> {
        let index = match self.sections.iter().position(|s| s.kind() == kind) {
            Some(index) => index,
            None => {
                SectionContext::new(&mut *terminal, self.sheet.as_mut(), &self.doc, kind.header())
                    .mark_added()?;
                self.sections.push(kind.build());
                info!(title = %self.doc.title, section = kind.header(), "added section");
                self.sections.len() - 1
            }
        };

        let mut ctx = SectionContext::new(terminal, self.sheet.as_mut(), &self.doc, kind.header());
        self.sections[index].display_menu(&mut ctx)
    }

    /// Replace all sections with ones rebuilt from `records`.
    ///
    /// Records are grouped by section type in order of first appearance. An
    /// unregistered section type fails the whole load and leaves the current
    /// sections untouched.
    pub fn load_sections(&mut self, records: &[Record]) -> Result<()> {
        let mut groups: Vec<(SectionKind, Vec<Record>)> = Vec::new();
        for record in records {
            let kind = SectionKind::from_header(&record.section_type)
                .ok_or_else(|| WizardError::UnknownSectionType(record.section_type.clone()))?;
            match groups.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, rows)) => rows.push(record.clone()),
                None => groups.push((kind, vec![record.clone()])),
            }
        }

        self.sections = groups
            .into_iter()
            .map(|(kind, rows)| {
                let mut section = kind.build();
                section.load_section(&rows);
                section
            })
            .collect();
        Ok(())
    }

    /// The whole README as Markdown.
    pub fn output_raw(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.output_raw(&self.doc))
            .collect()
    }

    pub fn preview(&self, terminal: &mut Terminal) -> Result<()> {
        terminal.clear()?;
        terminal.say("========== README PREVIEW ==========".bright_cyan())?;
        terminal.say(self.output_raw())?;
        terminal.say("====================================".bright_cyan())?;
        terminal.prompt("Scroll up to read the whole document.")?;
        terminal.pause()
    }

    /// Write the Markdown to `path`.
    ///
    /// An existing file is first copied aside; the backup's path is returned.
    pub fn output_to_file(&self, path: &Path) -> Result<Option<PathBuf>> {
        let backup = if path.exists() {
            let backup = backup_path(path);
            fs::copy(path, &backup)
                .with_context(|| format!("Failed to back up {}", path.display()))?;
            Some(backup)
        } else {
            None
        };

        fs::write(path, self.output_raw())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(title = %self.doc.title, path = %path.display(), "wrote readme");
        Ok(backup)
    }
}

/// `<file>.<YYYYmmdd-HHMMSS>.bak` next to `path`.
fn backup_path(path: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{timestamp}.bak"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::{FeaturesSection, IntroductionSection, SECTION_MARKER};
    use crate::store::{MemoryWorkbook, Workbook};
    use crate::terminal::ScriptedLines;
    use tempfile::TempDir;

    fn empty(title: &str) -> Result<(MemoryWorkbook, Readme)> {
        let mut workbook = MemoryWorkbook::default();
        let sheet = workbook.open(title)?;
        Ok((workbook, Readme::new(DocumentInfo::new(title), sheet)))
    }

    fn kinds(readme: &Readme) -> Vec<SectionKind> {
        readme.sections().map(|s| s.kind()).collect()
    }

    #[test]
    fn test_add_same_section_twice_keeps_one() -> Result<()> {
        let (workbook, mut readme) = empty("Demo")?;
        // Add Features (empty, return), Introduction (three answers), Features again.
        let mut terminal = Terminal::scripted(
            ScriptedLines::new(["3", "5", "1", "A tool."])
                .end_of_input()
                .lines(["", "", "3", "5"]),
        );
        readme.add_section(&mut terminal)?;
        readme.add_section(&mut terminal)?;
        readme.add_section(&mut terminal)?;

        assert_eq!(kinds(&readme), vec![SectionKind::Features, SectionKind::Introduction]);

        let markers = workbook
            .clone()
            .open("Demo")?
            .records()?
            .into_iter()
            .filter(|r| r.data_type == SECTION_MARKER)
            .map(|r| r.section_type)
            .collect::<Vec<_>>();
        assert_eq!(markers, vec!["Features", "Introduction"]);
        Ok(())
    }

    #[test]
    fn test_reopening_keeps_existing_answers() -> Result<()> {
        let (_workbook, mut readme) = empty("Demo")?;
        let mut terminal = Terminal::scripted(
            ScriptedLines::new(["A tool."])
                .end_of_input()
                .lines(["http://x", "", ""])
                .end_of_input()
                .lines(["", ""]),
        );
        readme.open_section(SectionKind::Introduction, &mut terminal)?;
        readme.open_section(SectionKind::Introduction, &mut terminal)?;

        let intro = readme
            .section(SectionKind::Introduction)
            .and_then(|s| s.downcast_ref::<IntroductionSection>())
            .unwrap();
        assert_eq!(intro.description, "A tool.");
        assert_eq!(intro.demo_link, "http://x");
        Ok(())
    }

    #[test]
    fn test_add_section_return_adds_nothing() -> Result<()> {
        let (_workbook, mut readme) = empty("Demo")?;
        let mut terminal = Terminal::scripted(ScriptedLines::new(["4"]));
        readme.add_section(&mut terminal)?;
        assert!(readme.sections().next().is_none());
        Ok(())
    }

    #[test]
    fn test_load_groups_by_first_appearance() -> Result<()> {
        let (_workbook, mut readme) = empty("Demo")?;
        readme.load_sections(&[
            Record::new("Features", "1|feature_name", "Search"),
            Record::new("Introduction", "description", "A tool."),
            Record::new("Features", "2|feature_name", "Export"),
        ])?;

        assert_eq!(kinds(&readme), vec![SectionKind::Features, SectionKind::Introduction]);
        let features = readme
            .section(SectionKind::Features)
            .and_then(|s| s.downcast_ref::<FeaturesSection>())
            .unwrap();
        assert_eq!(features.features.len(), 2);
        Ok(())
    }

    #[test]
    fn test_unknown_section_aborts_whole_load() -> Result<()> {
        let (_workbook, mut readme) = empty("Demo")?;
        readme.load_sections(&[Record::new("Introduction", "description", "Kept")])?;

        let err = readme
            .load_sections(&[
                Record::new("Introduction", "description", "A tool."),
                Record::new("Deployment", "host", "heroku"),
            ])
            .unwrap_err();

        assert!(err.to_string().contains("Deployment"));
        assert!(matches!(
            err.downcast_ref::<WizardError>(),
            Some(WizardError::UnknownSectionType(key)) if key == "Deployment"
        ));
        assert!(readme.output_raw().contains("Kept"));
        Ok(())
    }

    #[test]
    fn test_load_is_idempotent_and_never_writes() -> Result<()> {
        let mut workbook = MemoryWorkbook::default();
        workbook.insert(
            "Demo",
            &[
                Record::new("Introduction", "description", "A tool."),
                Record::new("User Experience", "site_aims", "grow users"),
                Record::new("Features", "1|feature_name", "Search"),
            ],
        );

        let first = Readme::load(DocumentInfo::new("Demo"), workbook.open("Demo")?)?;
        let mut second = Readme::load(DocumentInfo::new("Demo"), workbook.open("Demo")?)?;
        let records = workbook.open("Demo")?.records()?;
        second.load_sections(&records)?;

        assert_eq!(first.output_raw(), second.output_raw());
        assert_eq!(workbook.cell_updates(), 0);
        Ok(())
    }

    #[test]
    fn test_output_raw_follows_insertion_order() -> Result<()> {
        let (_workbook, mut readme) = empty("Demo")?;
        readme.load_sections(&[
            Record::new("Features", "section_added", "t"),
            Record::new("Introduction", "description", "A tool."),
        ])?;
        let out = readme.output_raw();
        assert!(out.starts_with("## Features\n\n# Demo\n\n## Introduction\n\nA tool."));
        Ok(())
    }

    #[test]
    fn test_output_to_file_backs_up_existing() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("README.md");
        let (_workbook, mut readme) = empty("Demo")?;
        readme.load_sections(&[Record::new("Introduction", "description", "First")])?;

        assert_eq!(readme.output_to_file(&path)?, None);
        assert_eq!(fs::read_to_string(&path)?, readme.output_raw());

        readme.load_sections(&[Record::new("Introduction", "description", "Second")])?;
        let backup = readme.output_to_file(&path)?.unwrap();

        assert!(fs::read_to_string(&backup)?.contains("First"));
        assert!(fs::read_to_string(&path)?.contains("Second"));
        assert!(backup.to_string_lossy().ends_with(".bak"));
        Ok(())
    }

    #[test]
    fn test_display_menu_return_detaches() -> Result<()> {
        let (_workbook, mut readme) = empty("Demo")?;
        let mut terminal = Terminal::scripted(ScriptedLines::new(["2", "", "4"]));
        let out = Path::new("unused.md");

        assert_eq!(readme.display_menu(&mut terminal, out)?, ReadmeFlow::Stay);
        assert_eq!(readme.display_menu(&mut terminal, out)?, ReadmeFlow::Detach);
        Ok(())
    }
}
