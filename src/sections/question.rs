//! Declarative questions and the loop that asks them.

use super::SectionContext;
use anyhow::Result;

/// Stores an answer on the section. Blank answers must leave the value alone.
pub type Setter<S> = fn(&mut S, String, &mut SectionContext<'_>) -> Result<()>;

/// Current value shown before the user overwrites it.
pub type Preview<S> = fn(&S) -> String;

/// Runs a whole interaction of its own (a list sub-menu, a Y/N loop, ...).
pub type Handler<S> = fn(&mut S, &mut SectionContext<'_>) -> Result<()>;

pub enum Handling<S> {
    Answer {
        setter: Setter<S>,
        preview: Option<Preview<S>>,
        multiline: bool,
    },
    Custom(Handler<S>),
}

pub struct Question<S> {
    pub text: &'static str,
    pub handling: Handling<S>,
}

impl<S> Question<S> {
    pub fn answer(text: &'static str, setter: Setter<S>) -> Self {
        Self {
            text,
            handling: Handling::Answer {
                setter,
                preview: None,
                multiline: false,
            },
        }
    }

    pub fn custom(text: &'static str, handler: Handler<S>) -> Self {
        Self {
            text,
            handling: Handling::Custom(handler),
        }
    }

    pub fn with_preview(mut self, preview: Preview<S>) -> Self {
        if let Handling::Answer { preview: slot, .. } = &mut self.handling {
            *slot = Some(preview);
        }
        self
    }

    pub fn multiline(mut self) -> Self {
        if let Handling::Answer { multiline, .. } = &mut self.handling {
            *multiline = true;
        }
        self
    }
}

/// Ask every question in order. Order matters: later setters may rely on
/// earlier answers.
pub fn run_questions<S>(
    section: &mut S,
    questions: &[Question<S>],
    ctx: &mut SectionContext<'_>,
) -> Result<()> {
    for question in questions {
        ask(section, question, ctx)?;
    }
    Ok(())
}

pub fn ask<S>(section: &mut S, question: &Question<S>, ctx: &mut SectionContext<'_>) -> Result<()> {
    ctx.terminal.clear()?;

    match &question.handling {
        Handling::Custom(handler) => handler(section, ctx),
        Handling::Answer {
            setter,
            preview,
            multiline,
        } => {
            ctx.terminal.prompt(question.text)?;

            if let Some(preview) = preview {
                let current = preview(section);
                if !current.is_empty() {
                    ctx.terminal.show_current(&current)?;
                }
            }

            let answer = ctx.terminal.read_input(*multiline)?;
            setter(section, answer, ctx)
        }
    }
}

/// The trimmed answer, or `None` when it was blank.
pub fn non_blank(answer: &str) -> Option<String> {
    let trimmed = answer.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
