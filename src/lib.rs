//! rebase-bot — comment-triggered pull request rebasing
//!
//! A short-lived CI bot: a `/rebase` or `/autosquash` comment on a pull
//! request triggers one run, which resolves the PR from the CI event
//! payload, waits for the platform to confirm the PR is rebaseable,
//! configures a local git identity for the triggering user, rebases the
//! head branch onto the base branch, and force-pushes (with lease) back to
//! the contributor's fork.
//!
//! The pipeline is strictly sequential and every failure is terminal for
//! the run; the CI job's log is the sole audit trail.

pub mod bot;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod git;
pub mod identity;
pub mod platform;
pub mod types;
