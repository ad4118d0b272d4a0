//! Terminal I/O for the wizard.
//!
//! [`Terminal`] owns the line source and the output stream, so every prompt in
//! the crate goes through one value that tests can script. Colour comes from
//! `colored`, screen clearing from `console` (only when stdout is a real
//! terminal).

mod input;
mod menu;

pub use input::{read_input, LineSource, ScriptedLines, StdinLines};
pub use menu::{Menu, MenuKind, MenuOption};

use anyhow::{Context, Result};
use colored::Colorize;
use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::rc::Rc;

pub struct Terminal {
    input: Box<dyn LineSource>,
    output: Box<dyn Write>,
    screen: Option<console::Term>,
}

impl Terminal {
    /// Interactive terminal on stdin/stdout.
    pub fn stdio(clear_screen: bool) -> Self {
        let term = console::Term::stdout();
        let screen = (clear_screen && term.is_term()).then_some(term);
        Self {
            input: Box::new(StdinLines),
            output: Box::new(io::stdout()),
            screen,
        }
    }

    /// Scripted answers, output discarded.
    pub fn scripted(lines: ScriptedLines) -> Self {
        Self {
            input: Box::new(lines),
            output: Box::new(io::sink()),
            screen: None,
        }
    }

    /// Scripted answers, output captured for inspection.
    pub fn with_transcript(lines: ScriptedLines) -> (Self, Transcript) {
        let transcript = Transcript::default();
        let terminal = Self {
            input: Box::new(lines),
            output: Box::new(transcript.clone()),
            screen: None,
        };
        (terminal, transcript)
    }

    pub fn clear(&mut self) -> Result<()> {
        if let Some(screen) = &self.screen {
            screen.clear_screen().context("Failed to clear screen")?;
        }
        Ok(())
    }

    /// Write text as-is.
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
            .context("Failed to write to terminal")
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        self.write(&format!("{text}\n"))
    }

    /// A question or instruction.
    pub fn prompt(&mut self, text: &str) -> Result<()> {
        self.say(text.yellow())
    }

    /// Something the user should notice: empty lists, bad selections, failures.
    pub fn warn(&mut self, text: &str) -> Result<()> {
        self.say(text.red())
    }

    /// A list entry as shown in "view" screens.
    pub fn entry(&mut self, position: usize, text: &str) -> Result<()> {
        self.say(format!("[{position}] {text}").green())
    }

    /// Show the value an answer would overwrite.
    pub fn show_current(&mut self, value: &str) -> Result<()> {
        self.say(format!(
            "\n{}{}",
            "Current Value: ".magenta(),
            value.bright_magenta()
        ))?;
        self.say("Leave input blank to not modify current value.".magenta())
    }

    /// Capture an answer; see [`read_input`].
    pub fn read_input(&mut self, multiline: bool) -> Result<String> {
        if multiline {
            self.say(format!(
                "{}{}",
                "[Multi Line] ".red(),
                "Enter/Paste your content. Ctrl + D or Ctrl + Z (Windows) to submit.".bright_yellow()
            ))?;
        }
        read_input(self.input.as_mut(), multiline)
    }

    pub fn read_line(&mut self) -> Result<String> {
        self.read_input(false)
    }

    /// Ask `question` and return one line of answer.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        self.prompt(question)?;
        self.write(&" -> ".yellow().to_string())?;
        self.read_line()
    }

    pub fn pause(&mut self) -> Result<()> {
        self.write(&"Press enter to continue..".yellow().to_string())?;
        self.read_line().map(|_| ())
    }

    /// Ask a yes/no question until the answer is Y or N (any case).
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            self.prompt(&format!("{question} [Y/N]"))?;
            match self.read_line()?.trim().to_uppercase().as_str() {
                "Y" => return Ok(true),
                "N" => return Ok(false),
                _ => self.warn("Please try again!")?,
            }
        }
    }
}

/// Shared in-memory sink capturing everything a [`Terminal`] printed.
#[derive(Debug, Clone, Default)]
pub struct Transcript(Rc<RefCell<Vec<u8>>>);

impl Transcript {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Transcript {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
