//! Platform service for the code-hosting REST API
//!
//! Provides a trait over the three read operations the bot needs, plus the
//! bounded poll that waits for the eventually-consistent `rebaseable` flag.
//! All mutation happens via git over the network, never via the REST API.

mod github;
mod retry;

pub use github::GitHubClient;
pub use retry::{RetryPolicy, poll_until};

use crate::error::{Error, Result};
use crate::types::{PullRequestInfo, UserProfile};
use async_trait::async_trait;
use tracing::debug;

/// Read-only platform operations, each a single authenticated HTTP GET
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Body of the most recent comment on the pull request.
    ///
    /// An empty comment collection is a transport failure: a comment
    /// triggered this run, so one must exist.
    async fn latest_comment(&self, pr_number: u64) -> Result<String>;

    /// Pull request metadata, as the platform currently has it. The
    /// `rebaseable` field may still be unknown; no retry happens at this
    /// level (see [`await_rebaseable`]).
    async fn pull_request(&self, pr_number: u64) -> Result<PullRequestInfo>;

    /// Profile of a platform user
    async fn user_profile(&self, login: &str) -> Result<UserProfile>;

    /// Host used for noreply-email synthesis ("github.com" unless running
    /// against an enterprise install)
    fn web_host(&self) -> &str;
}

/// Poll the pull request until the platform has decided whether it is
/// rebaseable.
///
/// Re-fetches while the flag is absent, sleeping `policy.interval` between
/// attempts, up to `policy.max_attempts` requests total. Returns the PR
/// info once the flag is `true`. A flag that settles to `false`, or one
/// still absent after the budget, is a hard stop: no git mutation may be
/// attempted.
pub async fn await_rebaseable(
    platform: &dyn PlatformService,
    pr_number: u64,
    policy: &RetryPolicy,
) -> Result<PullRequestInfo> {
    let info = poll_until(
        policy,
        move || platform.pull_request(pr_number),
        |pr: &PullRequestInfo| pr.rebaseable.is_some(),
    )
    .await?;

    match info.rebaseable {
        Some(true) => {
            debug!(pr_number, "pull request is rebaseable");
            Ok(info)
        }
        Some(false) => {
            debug!(pr_number, "platform reports the pull request is not rebaseable");
            Err(Error::NotRebaseable(pr_number))
        }
        None => {
            debug!(pr_number, "rebaseable flag never resolved within the retry budget");
            Err(Error::NotRebaseable(pr_number))
        }
    }
}
