//! CI event payload reader
//!
//! The triggering event arrives as a JSON document in one of two shapes: a
//! pull-request webhook (`pull_request.number` / `pull_request.user.login`)
//! or an issue-comment webhook (`issue.number` / `comment.user.login`).
//! Both are parsed with one set of structs whose fields are all optional.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// What the event payload yielded. Either field may be absent; the caller
/// decides whether that is fatal (the PR number can also come from the
/// environment).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventInfo {
    /// Pull request number, from `pull_request.number` or `issue.number`
    pub pr_number: Option<u64>,
    /// Triggering user login; the comment author wins over the PR author
    pub user_login: Option<String>,
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<NumberedEntity>,
    issue: Option<NumberedEntity>,
    comment: Option<Authored>,
}

#[derive(Deserialize)]
struct NumberedEntity {
    number: Option<u64>,
    user: Option<UserRef>,
}

#[derive(Deserialize)]
struct Authored {
    user: Option<UserRef>,
}

#[derive(Deserialize)]
struct UserRef {
    login: Option<String>,
}

/// Read the event payload file and extract the PR number and user login.
///
/// An unreadable file or malformed JSON is a configuration failure: the CI
/// platform promised this file, so its absence means the bot is wired up
/// wrong, not that the run should be retried.
pub fn read_event(path: &Path) -> Result<EventInfo> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read event payload {}: {e}", path.display())))?;
    let payload: EventPayload = serde_json::from_str(&raw)
        .map_err(|e| Error::Config(format!("malformed event payload {}: {e}", path.display())))?;

    let pr_number = payload
        .pull_request
        .as_ref()
        .and_then(|pr| pr.number)
        .or_else(|| payload.issue.as_ref().and_then(|issue| issue.number));

    // Prefer the comment author; fall back to the pull-request author.
    let user_login = payload
        .comment
        .as_ref()
        .and_then(|c| c.user.as_ref())
        .and_then(|u| u.login.clone())
        .or_else(|| {
            payload
                .pull_request
                .as_ref()
                .and_then(|pr| pr.user.as_ref())
                .and_then(|u| u.login.clone())
        });

    debug!(?pr_number, ?user_login, "read event payload");
    Ok(EventInfo {
        pr_number,
        user_login,
    })
}
