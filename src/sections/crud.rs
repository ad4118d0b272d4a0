//! List sub-menus shared by every list-valued attribute.
//!
//! One state machine serves site aims, target audience, user stories,
//! features and points of note:
//!
//! ```text
//! ListMenu ──Add──────────────▶ editor.add ─────────────┐
//!    │ ──View─────────────────▶ all entries, pause ─────┤
//!    │ ──Edit/Delete──▶ SelectIndex ◀──N── Confirm       │
//!    │                    │ blank ─────────────────────┤
//!    │                    └─1..=len──▶ Confirm ──Y──▶ mutate
//!    └──Return──▶ back to the section
//! ```

use super::question::non_blank;
use super::SectionContext;
use crate::terminal::{Menu, Terminal};
use anyhow::Result;

/// How a list names its entries in prompts.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub singular: &'static str,
    pub plural: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListOp {
    Add,
    Edit,
    View,
    Delete,
    Return,
}

/// A list the CRUD menu can drive.
pub trait ListEditor {
    fn labels(&self) -> Labels;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One-line description used when picking an entry.
    fn summary(&self, index: usize) -> String;

    /// Full description shown when viewing or confirming an entry.
    fn detail(&self, index: usize) -> String {
        self.summary(index)
    }

    fn add(&mut self, ctx: &mut SectionContext<'_>) -> Result<()>;

    fn edit(&mut self, index: usize, ctx: &mut SectionContext<'_>) -> Result<()>;

    fn delete(&mut self, index: usize, ctx: &mut SectionContext<'_>) -> Result<()>;
}

/// Run the Add/Edit/View/Delete/Return menu until the user returns.
pub fn manage<E: ListEditor + ?Sized>(editor: &mut E, ctx: &mut SectionContext<'_>) -> Result<()> {
    let Labels { singular, plural } = editor.labels();
    let menu = Menu::choice(
        format!("Manage {plural}:"),
        [
            (format!("Add {singular}"), ListOp::Add),
            (format!("Edit {singular}"), ListOp::Edit),
            (format!("View {plural}"), ListOp::View),
            (format!("Delete {singular}"), ListOp::Delete),
            ("Return".to_string(), ListOp::Return),
        ],
    )?;

    loop {
        match *ctx.terminal.choose(&menu)? {
            ListOp::Add => editor.add(ctx)?,
            ListOp::Edit => {
                if let Some(index) = select_confirmed(&*editor, "edit", ctx.terminal)? {
                    editor.edit(index, ctx)?;
                }
            }
            ListOp::View => view_all(&*editor, ctx.terminal)?,
            ListOp::Delete => {
                if let Some(index) = select_confirmed(&*editor, "delete", ctx.terminal)? {
                    editor.delete(index, ctx)?;
                }
            }
            ListOp::Return => return Ok(()),
        }
    }
}

/// Show every entry in detail and wait for the user.
pub fn view_all<E: ListEditor + ?Sized>(editor: &E, terminal: &mut Terminal) -> Result<()> {
    if editor.is_empty() {
        return report_empty(editor, terminal);
    }
    terminal.clear()?;
    list_entries(editor, terminal, true)?;
    terminal.pause()
}

/// Ask which entry to `verb`, confirm it, and return its 0-based index.
///
/// Returns `None` when the list is empty or the user backs out with a blank
/// answer. Anything that is not a position in `1..=len` is asked again.
pub fn select_confirmed<E: ListEditor + ?Sized>(
    editor: &E,
    verb: &str,
    terminal: &mut Terminal,
) -> Result<Option<usize>> {
    if editor.is_empty() {
        report_empty(editor, terminal)?;
        return Ok(None);
    }

    let singular = editor.labels().singular;
    let mut notice: Option<String> = None;
    loop {
        terminal.clear()?;
        list_entries(editor, terminal, false)?;
        if let Some(notice) = notice.take() {
            terminal.warn(&notice)?;
        }

        terminal.prompt(&format!(
            "\nWhich {singular} would you like to {verb}? (press enter to go back)"
        ))?;
        let answer = terminal.read_line()?;
        if answer.trim().is_empty() {
            return Ok(None);
        }

        let Some(index) = parse_position(&answer, editor.len()) else {
            notice = Some(format!("Please enter a number between 1 and {}.", editor.len()));
            continue;
        };

        terminal.clear()?;
        terminal.say(editor.detail(index))?;
        if terminal.confirm(&format!("\nIs this the {singular} you wish to {verb}?"))? {
            return Ok(Some(index));
        }
    }
}

/// 0-based index for a 1-based position typed by the user.
pub fn parse_position(answer: &str, len: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

fn list_entries<E: ListEditor + ?Sized>(
    editor: &E,
    terminal: &mut Terminal,
    detailed: bool,
) -> Result<()> {
    for index in 0..editor.len() {
        terminal.entry(index + 1, &editor.summary(index))?;
        if detailed {
            let detail = editor.detail(index);
            if detail != editor.summary(index) {
                terminal.say(detail)?;
            }
        }
    }
    Ok(())
}

fn report_empty<E: ListEditor + ?Sized>(editor: &E, terminal: &mut Terminal) -> Result<()> {
    terminal.clear()?;
    terminal.warn(&format!(
        "This readme currently has no {}. Please add some!",
        editor.labels().plural
    ))?;
    terminal.pause()
}

/// Non-blank lines of `text`, trimmed.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().filter_map(non_blank).collect()
}

/// A list of plain strings persisted as one newline-joined field.
pub struct TextList<'a> {
    pub items: &'a mut Vec<String>,
    pub field: String,
    pub labels: Labels,
    /// Accept several entries at once, one per line.
    pub multiline_add: bool,
}

impl TextList<'_> {
    fn persist(&self, ctx: &mut SectionContext<'_>) -> Result<()> {
        ctx.write_field(&self.field, &self.items.join("\n"))
    }
}

impl ListEditor for TextList<'_> {
    fn labels(&self) -> Labels {
        self.labels
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn summary(&self, index: usize) -> String {
        self.items[index].clone()
    }

    fn add(&mut self, ctx: &mut SectionContext<'_>) -> Result<()> {
        ctx.terminal.clear()?;
        ctx.terminal
            .prompt(&format!("Please enter the {} to add:", self.labels.singular))?;

        let added = split_lines(&ctx.terminal.read_input(self.multiline_add)?);
        if added.is_empty() {
            return Ok(());
        }
        self.items.extend(added);
        self.persist(ctx)
    }

    fn edit(&mut self, index: usize, ctx: &mut SectionContext<'_>) -> Result<()> {
        ctx.terminal.clear()?;
        ctx.terminal.show_current(&self.items[index])?;

        let answer = ctx.terminal.ask(&format!(
            "\nPlease enter the new {} value:",
            self.labels.singular
        ))?;
        if let Some(value) = non_blank(&answer) {
            self.items[index] = value;
            self.persist(ctx)?;
        }
        Ok(())
    }

    fn delete(&mut self, index: usize, ctx: &mut SectionContext<'_>) -> Result<()> {
        self.items.remove(index);
        self.persist(ctx)
    }
}
