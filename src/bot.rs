//! The rebase pipeline
//!
//! One invocation is one linear chain: read the triggering comment,
//! classify it, wait for the platform to decide rebaseability, resolve the
//! committer identity, configure git, rebase, push. State lives only in
//! the immutable context and the values each stage returns.

use crate::command::BotCommand;
use crate::error::Result;
use crate::git::{GitOrchestrator, GitRunner};
use crate::identity;
use crate::platform::{PlatformService, RetryPolicy, await_rebaseable};
use crate::types::{InvocationContext, RebaseMode};
use anstream::println;
use owo_colors::OwoColorize;
use tracing::info;

/// Run the whole pipeline once.
///
/// Any error is terminal: the caller renders it and exits non-zero. No git
/// command runs before the comment is classified and the pull request is
/// confirmed rebaseable.
pub async fn run<R: GitRunner>(
    ctx: &InvocationContext,
    platform: &dyn PlatformService,
    git: &mut GitOrchestrator<R>,
    retry: &RetryPolicy,
) -> Result<()> {
    println!(
        "Collecting information about PR #{} of {}...",
        ctx.pr_number.bold(),
        ctx.repository.bold()
    );

    let comment = platform.latest_comment(ctx.pr_number).await?;
    let command = BotCommand::parse(&comment)?;
    let mode = if ctx.autosquash {
        RebaseMode::Autosquash
    } else {
        command.mode()
    };
    info!(%command, %mode, "classified triggering comment");

    let pr = await_rebaseable(platform, ctx.pr_number, retry).await?;
    println!(
        "Rebasing {} onto {} ({} mode)",
        format!("{}:{}", pr.head_repo, pr.head_ref).bold(),
        format!("origin/{}", pr.base_ref).bold(),
        mode
    );

    // The comment author committed this action; fall back to the PR author
    // when the event payload had no comment.
    let login = ctx
        .event_login
        .clone()
        .unwrap_or_else(|| pr.user_login.clone());
    let profile = platform.user_profile(&login).await?;
    let committer = identity::resolve(&profile, &login, platform.web_host());
    info!(name = %committer.name, email = %committer.email, "resolved committer identity");

    git.configure_identity(&committer, &pr.head_repo)?;
    git.rebase(&pr.base_ref, &pr.head_ref, mode)?;

    println!(
        "{} Rebased {} and pushed it back to the fork",
        "✓".green(),
        pr.head_ref.bold()
    );
    Ok(())
}
