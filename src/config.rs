//! Invocation context construction
//!
//! All environment input is read exactly once, here, and frozen into an
//! [`InvocationContext`] that the rest of the pipeline treats as immutable.
//! Missing required values are reported as [`Error::Config`] so the binary
//! exits with code 1 rather than clap's usage-error code.

use crate::error::{Error, Result};
use crate::event::read_event;
use crate::types::InvocationContext;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// Default checkout location inside a GitHub Actions container
const DEFAULT_WORKSPACE: &str = "/github/workspace";

/// Comment-triggered CI bot that rebases pull requests onto their base branch
#[derive(Parser, Debug)]
#[command(name = "rebase-bot", version, about)]
pub struct Args {
    /// Access token for API reads and authenticated pushes
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository identifier in `owner/name` form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Explicit pull request number; overrides the event payload
    #[arg(long, env = "PR_NUMBER")]
    pub pr_number: Option<u64>,

    /// Path to the CI event payload file
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Git checkout the bot operates on
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = DEFAULT_WORKSPACE)]
    pub workspace: PathBuf,

    /// Force autosquash mode regardless of the triggering command
    #[arg(long, env = "INPUT_AUTOSQUASH")]
    pub autosquash: bool,

    /// Custom host for GitHub Enterprise (e.g. "github.example.com")
    #[arg(long, env = "GITHUB_HOST")]
    pub host: Option<String>,
}

/// Resolve the parsed arguments into an immutable invocation context.
///
/// The PR number comes from the explicit override when present, otherwise
/// from the event payload. Failing to determine one from either source is
/// fatal and never retried.
pub fn resolve_context(args: Args) -> Result<InvocationContext> {
    let token = args
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Config("GITHUB_TOKEN is not set".to_string()))?;

    let repository = args
        .repository
        .filter(|r| !r.is_empty())
        .ok_or_else(|| Error::Config("GITHUB_REPOSITORY is not set".to_string()))?;

    let event = match args.event_path {
        Some(ref path) => Some(read_event(path)?),
        None => None,
    };

    let pr_number = args
        .pr_number
        .or_else(|| event.as_ref().and_then(|e| e.pr_number))
        .ok_or_else(|| {
            Error::Config(
                "failed to determine the pull request number from PR_NUMBER or the event payload"
                    .to_string(),
            )
        })?;

    let event_login = event.and_then(|e| e.user_login);

    debug!(repository, pr_number, ?event_login, "resolved invocation context");
    Ok(InvocationContext {
        repository,
        pr_number,
        token,
        event_login,
        autosquash: args.autosquash,
        workdir: args.workspace,
        host: args.host,
    })
}
