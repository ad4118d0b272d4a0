//! Line capture primitives.
//!
//! A [`LineSource`] yields one line at a time and reports the end-of-input
//! signal (Ctrl + D on a terminal) as `None`. After that signal the source may
//! be read again: a terminal simply waits for the next line.

use crate::error::WizardError;
use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Where answers come from.
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads from the process's standard input.
pub struct StdinLines;

impl LineSource for StdinLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        strip_terminator(&mut line);
        Ok(Some(line))
    }
}

/// Pre-recorded answers, with explicit end-of-input markers.
///
/// Used for tests and for driving the wizard from a script:
///
/// ```
/// use readme_wizard::terminal::ScriptedLines;
///
/// let lines = ScriptedLines::new(["1", "Demo"])
///     .line("first paragraph")
///     .end_of_input();
/// assert_eq!(lines.remaining(), 4);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedLines {
    queue: VecDeque<Option<String>>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().lines(lines)
    }

    /// Queue one more line.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.queue.push_back(Some(line.into()));
        self
    }

    /// Queue several lines.
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue.extend(lines.into_iter().map(|l| Some(l.into())));
        self
    }

    /// Queue an end-of-input signal, closing a multi-line block.
    pub fn end_of_input(mut self) -> Self {
        self.queue.push_back(None);
        self
    }

    /// Entries (lines and markers) not consumed yet.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl LineSource for ScriptedLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.queue.pop_front().flatten())
    }
}

/// Capture an answer.
///
/// Single-line mode returns exactly one line. Multi-line mode reads until end
/// of input and prefixes every line with `\n`, so blank lines inside pasted
/// text survive.
pub fn read_input(source: &mut dyn LineSource, multiline: bool) -> Result<String> {
    if !multiline {
        return match source.next_line().context("Failed to read input")? {
            Some(line) => Ok(line),
            None => Err(WizardError::InputClosed.into()),
        };
    }

    let mut text = String::new();
    while let Some(line) = source.next_line().context("Failed to read input")? {
        text.push('\n');
        text.push_str(&line);
    }
    Ok(text)
}

fn strip_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
