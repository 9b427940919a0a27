//! Error types for rebase-bot
//!
//! Every failure here is terminal for a run: the bot performs no partial
//! recovery beyond the bounded rebaseable poll, so each variant maps to a
//! non-zero process exit. Rendering (captured subprocess streams, HTTP
//! status) happens at the binary boundary, not here.

use crate::git::GitOutput;

/// Result type alias for rebase-bot
pub type Result<T> = std::result::Result<T, Error>;

/// All error kinds the bot can terminate with
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid environment input (token, repository, PR number)
    #[error("configuration: {0}")]
    Config(String),

    /// Non-success HTTP response or malformed response body
    #[error("transport: {message}")]
    Transport {
        /// Human-readable description, includes the request target
        message: String,
        /// HTTP status, when the failure came from a completed response
        status: Option<u16>,
    },

    /// The platform reports the PR cannot be cleanly rebased, or the
    /// `rebaseable` field never resolved within the retry budget
    #[error("pull request #{0} is not rebaseable")]
    NotRebaseable(u64),

    /// The rebase subprocess exited non-zero; the branch is left local
    /// and unpushed
    #[error("rebase of {branch} stopped with conflicts")]
    RebaseConflict {
        /// The local branch the rebase was running on
        branch: String,
        /// Captured streams and exit code of the rebase subprocess
        output: GitOutput,
    },

    /// A git subprocess other than the rebase itself failed
    #[error("git {step} failed")]
    Git {
        /// Which pipeline step was running (e.g. "fetch base", "push")
        step: String,
        /// Captured streams and exit code
        output: GitOutput,
    },

    /// Comment text outside the known command vocabulary
    #[error("unrecognized command: {0:?}")]
    UnrecognizedCommand(String),
}

impl Error {
    /// Build a transport error without an HTTP status (connection-level
    /// failures, truncated bodies).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
        }
    }

    /// Captured subprocess output, when this error carries one.
    pub const fn git_output(&self) -> Option<&GitOutput> {
        match self {
            Self::RebaseConflict { output, .. } | Self::Git { output, .. } => Some(output),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}
