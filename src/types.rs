//! Core types for rebase-bot

use serde::Deserialize;
use std::path::PathBuf;

/// Immutable invocation context, built once at startup from the process
/// environment and the CI event payload, then threaded through the pipeline.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Repository identifier in `owner/name` form
    pub repository: String,
    /// Pull request number driving this run
    pub pr_number: u64,
    /// Access token for API reads and authenticated pushes
    pub token: String,
    /// Login of the comment author from the event payload, when present.
    /// Falls back to the PR author during identity resolution.
    pub event_login: Option<String>,
    /// Force autosquash mode regardless of the triggering command
    pub autosquash: bool,
    /// The git checkout the bot operates on
    pub workdir: PathBuf,
    /// Custom host for GitHub Enterprise (None for github.com)
    pub host: Option<String>,
}

/// Pull request metadata fetched from the platform
#[derive(Debug, Clone)]
pub struct PullRequestInfo {
    /// Base repository in `owner/name` form
    pub base_repo: String,
    /// Base branch name
    pub base_ref: String,
    /// Head (fork) repository in `owner/name` form
    pub head_repo: String,
    /// Head branch name
    pub head_ref: String,
    /// Login of the PR author
    pub user_login: String,
    /// Whether the PR can be linearly replayed onto its base
    /// - `Some(true)` = rebaseable
    /// - `Some(false)` = has conflicts
    /// - `None` = unknown (GitHub still computing)
    pub rebaseable: Option<bool>,
}

/// A platform user profile, as returned by the users endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    /// Display name, if the user set one
    pub name: Option<String>,
    /// Public email, if the user exposes one
    pub email: Option<String>,
}

/// Committer name and email used for local git configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitterIdentity {
    /// Display name for `user.name`
    pub name: String,
    /// Email for `user.email`; never empty (synthesized when the profile
    /// withholds it)
    pub email: String,
}

/// How the rebase subprocess is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebaseMode {
    /// Plain `git rebase` onto the base branch
    Plain,
    /// Interactive rebase with `--autosquash` and a no-op sequence editor
    Autosquash,
}

impl std::fmt::Display for RebaseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Autosquash => write!(f, "autosquash"),
        }
    }
}
