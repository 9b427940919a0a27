//! Comment command classification
//!
//! Pure logic, no I/O. The vocabulary is closed and matched case-sensitively:
//! the bot must never guess intent from free-form comment text.

use crate::error::{Error, Result};
use crate::types::RebaseMode;

/// The commands the bot answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// `/rebase` — plain rebase onto the base branch
    Rebase,
    /// `/autosquash` or `/rebase-autosquash` — interactive autosquash rebase
    Autosquash,
}

impl BotCommand {
    /// Classify a comment body against the command vocabulary.
    ///
    /// The body is trimmed first (CI comments routinely carry trailing
    /// newlines); matching is otherwise exact and case-sensitive. Anything
    /// outside the vocabulary is a fatal [`Error::UnrecognizedCommand`].
    pub fn parse(comment: &str) -> Result<Self> {
        match comment.trim() {
            "/rebase" => Ok(Self::Rebase),
            "/autosquash" | "/rebase-autosquash" => Ok(Self::Autosquash),
            other => Err(Error::UnrecognizedCommand(other.to_string())),
        }
    }

    /// The rebase mode this command requests
    pub const fn mode(self) -> RebaseMode {
        match self {
            Self::Rebase => RebaseMode::Plain,
            Self::Autosquash => RebaseMode::Autosquash,
        }
    }
}

impl std::fmt::Display for BotCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rebase => write!(f, "/rebase"),
            Self::Autosquash => write!(f, "/autosquash"),
        }
    }
}
