//! Declarative menus and the validation loop that drives them.

use super::Terminal;
use crate::error::WizardError;
use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Response must be one of the option keys.
    Choice,
    /// Response is free text; blank input is rejected.
    FreeText,
}

#[derive(Debug, Clone)]
pub struct MenuOption<T> {
    pub key: String,
    pub label: String,
    pub value: T,
}

/// A menu description: pure data, rendered and validated by [`Terminal`].
///
/// Option values are plain data (a section kind, a list operation), never
/// callbacks; the caller decides what to do with the chosen value.
#[derive(Debug, Clone)]
pub struct Menu<T = ()> {
    prompt: String,
    kind: MenuKind,
    multiline: bool,
    options: Vec<MenuOption<T>>,
}

impl<T> Menu<T> {
    /// Build a choice menu keyed "1", "2", … in the given order.
    ///
    /// Fails when `entries` is empty.
    pub fn choice<L>(
        prompt: impl Into<String>,
        entries: impl IntoIterator<Item = (L, T)>,
    ) -> Result<Self, WizardError>
    where
        L: Into<String>,
    {
        let prompt = prompt.into();
        let options: Vec<_> = entries
            .into_iter()
            .enumerate()
            .map(|(i, (label, value))| MenuOption {
                key: (i + 1).to_string(),
                label: label.into(),
                value,
            })
            .collect();

        if options.is_empty() {
            return Err(WizardError::EmptyChoiceMenu(prompt));
        }

        Ok(Self {
            prompt,
            kind: MenuKind::Choice,
            multiline: false,
            options,
        })
    }

    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn kind(&self) -> MenuKind {
        self.kind
    }

    pub fn multiline(&self) -> bool {
        self.multiline
    }

    pub fn options(&self) -> &[MenuOption<T>] {
        &self.options
    }

    pub fn value_of(&self, key: &str) -> Option<&T> {
        self.options.iter().find(|o| o.key == key).map(|o| &o.value)
    }

    /// Validated response for `raw`, or `None` if it must be asked again.
    pub fn validate(&self, raw: &str) -> Option<String> {
        match self.kind {
            MenuKind::Choice => self
                .options
                .iter()
                .any(|o| o.key == raw)
                .then(|| raw.to_string()),
            MenuKind::FreeText => (!raw.trim().is_empty()).then(|| raw.to_string()),
        }
    }

    fn render(&self) -> String {
        let mut out = format!("{}\n", self.prompt.yellow());
        for option in &self.options {
            out.push_str(&format!("[{}] {}\n", option.key, option.label));
        }
        out
    }
}

impl Menu<()> {
    /// A menu whose answer is whatever non-blank text the user types.
    pub fn free_text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: MenuKind::FreeText,
            multiline: false,
            options: Vec::new(),
        }
    }
}

impl Terminal {
    /// Show `menu` until the user gives a valid response, then return it.
    ///
    /// Choice menus return the option key, free-text menus the raw text.
    pub fn process_menu<T>(&mut self, menu: &Menu<T>) -> Result<String> {
        loop {
            self.clear()?;
            self.write(&menu.render())?;
            self.prompt("\n\nEnter Your Input Below:")?;

            let raw = self.read_input(menu.multiline())?;
            if let Some(response) = menu.validate(&raw) {
                return Ok(response);
            }
            debug!(prompt = menu.prompt(), response = %raw, "rejected menu response");
        }
    }

    /// Run a choice menu and hand back the value behind the chosen key.
    pub fn choose<'m, T>(&mut self, menu: &'m Menu<T>) -> Result<&'m T> {
        let key = self.process_menu(menu)?;
        menu.value_of(&key)
            .with_context(|| format!("no option '{key}' in menu '{}'", menu.prompt()))
    }
}
