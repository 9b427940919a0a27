//! Git orchestration
//!
//! Issues the fixed sequence of git commands that performs the rebase:
//! remote configuration, fetch of base and head, checkout, rebase (plain or
//! interactive autosquash), status report, force-with-lease push. Branch
//! names are never assumed unique across remotes, hence the distinct
//! `origin` and `fork` remote aliases.

mod runner;

pub use runner::{GitOutput, GitRunner, ProcessGitRunner};

use crate::error::{Error, Result};
use crate::types::{CommitterIdentity, RebaseMode};
use anstream::println;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::debug;

/// Fixed settings for one orchestrator run
#[derive(Debug, Clone)]
pub struct GitSettings {
    /// The checkout the bot operates on (registered as a safe.directory)
    pub workdir: PathBuf,
    /// Host the remotes live on (e.g. "github.com")
    pub host: String,
    /// Access token embedded in the remote URLs
    pub token: String,
    /// Base repository in `owner/name` form (the `origin` remote)
    pub origin_repo: String,
}

/// Drives the git subprocess sequence for one rebase run
pub struct GitOrchestrator<R: GitRunner> {
    runner: R,
    settings: GitSettings,
}

impl<R: GitRunner> GitOrchestrator<R> {
    /// Create an orchestrator over the given runner and settings
    pub fn new(runner: R, settings: GitSettings) -> Self {
        Self { runner, settings }
    }

    /// Borrow the underlying runner (tests inspect recorded calls)
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Register the committer identity and wire up both remotes.
    ///
    /// The base repository stays on `origin`; the head (fork) repository is
    /// added as a second remote `fork`. Both URLs embed the short-lived
    /// access token.
    pub fn configure_identity(
        &mut self,
        identity: &CommitterIdentity,
        head_repo: &str,
    ) -> Result<()> {
        debug!(name = %identity.name, email = %identity.email, "configuring git identity");

        let workdir = self.settings.workdir.display().to_string();
        let origin_url = self.remote_url(&self.settings.origin_repo);
        let fork_url = self.remote_url(head_repo);

        self.run_step(
            "trust workdir",
            &["config", "--global", "--add", "safe.directory", &workdir],
        )?;
        self.run_step("set origin url", &["remote", "set-url", "origin", &origin_url])?;
        self.run_step(
            "set committer email",
            &["config", "--global", "user.email", &identity.email],
        )?;
        self.run_step(
            "set committer name",
            &["config", "--global", "user.name", &identity.name],
        )?;
        self.run_step("add fork remote", &["remote", "add", "fork", &fork_url])?;
        Ok(())
    }

    /// Rebase `head` (from the fork) onto `base` (from origin) and
    /// force-push the result back to the fork.
    ///
    /// A conflicted rebase aborts the run before the push: an unresolved
    /// rebase must never be force-pushed.
    pub fn rebase(&mut self, base: &str, head: &str, mode: RebaseMode) -> Result<()> {
        let local = format!("fork/{head}");
        let onto = format!("origin/{base}");

        self.run_step("fetch base", &["fetch", "origin", base])?;
        self.run_step("fetch head", &["fetch", "fork", head])?;
        self.run_step("checkout", &["checkout", "-b", &local, &local])?;

        match mode {
            RebaseMode::Plain => {
                self.run_rebase(&local, &["rebase", &onto], &[])?;
            }
            RebaseMode::Autosquash => {
                // A single-commit branch is folded into the base tip:
                // amend its message to mark it as a squash target, then let
                // the autosquash rebase pick it up.
                if self.commits_ahead(&onto)? == 1 {
                    self.mark_tip_for_squash(&onto)?;
                }
                self.run_rebase(
                    &local,
                    &["rebase", "-i", "--autosquash", &onto],
                    &[("GIT_SEQUENCE_EDITOR", ":")],
                )?;
            }
        }

        self.run_step("status", &["status"])?;
        let refspec = format!("{local}:{head}");
        self.run_step(
            "push",
            &["push", "--force-with-lease", "fork", &refspec],
        )?;
        Ok(())
    }

    /// Number of commits the checked-out branch is ahead of `onto`
    fn commits_ahead(&mut self, onto: &str) -> Result<u64> {
        let range = format!("{onto}..HEAD");
        let output = self.run_step("count commits", &["rev-list", "--count", &range])?;
        output.stdout.trim().parse().map_err(|e| Error::Git {
            step: "count commits".to_string(),
            output: GitOutput {
                exit_code: output.exit_code,
                stdout: output.stdout.clone(),
                stderr: format!("unparseable rev-list count: {e}"),
            },
        })
    }

    /// Amend the tip commit's message to `squash! <base tip subject>`
    fn mark_tip_for_squash(&mut self, onto: &str) -> Result<()> {
        let subject = self
            .run_step("read base subject", &["log", "-1", "--format=%s", onto])?
            .stdout
            .trim()
            .to_string();
        let message = format!("squash! {subject}");
        self.run_step("mark squash target", &["commit", "--amend", "-m", &message])?;
        Ok(())
    }

    /// Run one step, echo its streams, and fail the run on a non-zero exit
    fn run_step(&mut self, step: &str, args: &[&str]) -> Result<GitOutput> {
        self.announce(args);
        let raw = self.runner.run(args)?;
        let output = self.redact(raw);
        echo_streams(&output);
        if output.success() {
            Ok(output)
        } else {
            Err(Error::Git {
                step: step.to_string(),
                output,
            })
        }
    }

    /// Run the terminal rebase command; a non-zero exit is a conflict, not
    /// a generic git failure
    fn run_rebase(&mut self, branch: &str, args: &[&str], env: &[(&str, &str)]) -> Result<()> {
        self.announce(args);
        let raw = self.runner.run_with_env(args, env)?;
        let output = self.redact(raw);
        echo_streams(&output);
        if output.success() {
            Ok(())
        } else {
            Err(Error::RebaseConflict {
                branch: branch.to_string(),
                output,
            })
        }
    }

    /// Strip the access token from captured streams; they end up in the CI
    /// job log verbatim
    fn redact(&self, output: GitOutput) -> GitOutput {
        GitOutput {
            exit_code: output.exit_code,
            stdout: output.stdout.replace(&self.settings.token, "***"),
            stderr: output.stderr.replace(&self.settings.token, "***"),
        }
    }

    /// Token-embedded HTTPS URL for a repository on the configured host
    fn remote_url(&self, repo: &str) -> String {
        format!(
            "https://x-access-token:{}@{}/{repo}.git",
            self.settings.token, self.settings.host
        )
    }

    /// Print the command line with the token redacted
    fn announce(&self, args: &[&str]) {
        let rendered = args
            .iter()
            .map(|arg| arg.replace(&self.settings.token, "***"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{} git {rendered}", "▸".dimmed());
    }
}

/// Echo captured subprocess streams to the bot's own output so the CI job
/// log carries the full audit trail
fn echo_streams(output: &GitOutput) {
    if !output.stdout.is_empty() {
        println!("{}", output.stdout.trim_end());
    }
    if !output.stderr.is_empty() {
        println!("{}", output.stderr.trim_end().dimmed());
    }
}
