//! Typed failures the wizard reports to the user.
//!
//! Everything else travels as `anyhow::Error` with context attached.
//! Recoverable input problems (a bad menu key, an out-of-range index,
//! an empty list) never become errors: the prompt loops instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    /// The input source ended while a single-line answer was expected.
    #[error("input stream closed while waiting for an answer")]
    InputClosed,

    /// A persisted row names a section this build does not know.
    #[error("Unknown section type found in README: {0}")]
    UnknownSectionType(String),

    /// A choice menu was constructed without any options.
    #[error("choice menu '{0}' has no options")]
    EmptyChoiceMenu(String),
}
