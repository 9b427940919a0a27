//! Recording git runner for testing
//!
//! Captures every argv the orchestrator issues so tests can assert on the
//! exact command sequence, and lets a test fail one command (by argv
//! substring) to exercise conflict and abort paths.

#![allow(dead_code)]

use rebase_bot::error::Result;
use rebase_bot::git::{GitOutput, GitRunner};

/// One recorded git invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCall {
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl GitCall {
    /// Whether the argv contains this exact argument
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

/// Git runner that records calls instead of spawning processes
#[derive(Default)]
pub struct RecordingGitRunner {
    pub calls: Vec<GitCall>,
    /// Commands whose first argument matches fail with exit code 1
    fail_on: Vec<String>,
    /// Canned stdout per leading argument (e.g. rev-list counts)
    stdout_for: Vec<(String, String)>,
}

impl RecordingGitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every command whose first argument is `subcommand`
    pub fn fail_on(&mut self, subcommand: &str) {
        self.fail_on.push(subcommand.to_string());
    }

    /// Return `stdout` from every command whose first argument is
    /// `subcommand`
    pub fn set_stdout(&mut self, subcommand: &str, stdout: &str) {
        self.stdout_for
            .push((subcommand.to_string(), stdout.to_string()));
    }

    /// Recorded calls whose first argument is `subcommand`
    pub fn calls_to(&self, subcommand: &str) -> Vec<&GitCall> {
        self.calls
            .iter()
            .filter(|c| c.args.first().is_some_and(|a| a == subcommand))
            .collect()
    }
}

impl GitRunner for RecordingGitRunner {
    fn run_with_env(&mut self, args: &[&str], env: &[(&str, &str)]) -> Result<GitOutput> {
        let call = GitCall {
            args: args.iter().map(ToString::to_string).collect(),
            env: env
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        let first = call.args.first().cloned().unwrap_or_default();
        self.calls.push(call);

        if self.fail_on.iter().any(|f| *f == first) {
            return Ok(GitOutput {
                exit_code: Some(1),
                stdout: String::new(),
                stderr: format!("simulated failure of git {first}"),
            });
        }

        let stdout = self
            .stdout_for
            .iter()
            .find(|(sub, _)| *sub == first)
            .map(|(_, out)| out.clone())
            .unwrap_or_default();

        Ok(GitOutput {
            exit_code: Some(0),
            stdout,
            stderr: String::new(),
        })
    }
}
