//! Git subprocess execution seam
//!
//! The version-control tool is an opaque subprocess with an
//! argv/stdout/stderr/exit-code contract. Putting a trait at this seam lets
//! tests substitute a recording runner and assert on the exact command
//! sequence without touching a real repository.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of one git invocation
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    /// Process exit code; `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl GitOutput {
    /// Whether the invocation exited zero
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Executes git commands and captures their output
pub trait GitRunner {
    /// Run `git <args>` with extra environment variables, capturing both
    /// streams. A non-zero exit is returned as a normal [`GitOutput`];
    /// failing to spawn the process at all is an error.
    fn run_with_env(&mut self, args: &[&str], env: &[(&str, &str)]) -> Result<GitOutput>;

    /// Run `git <args>` with no extra environment
    fn run(&mut self, args: &[&str]) -> Result<GitOutput> {
        self.run_with_env(args, &[])
    }
}

/// Runner backed by the real `git` binary
pub struct ProcessGitRunner {
    workdir: PathBuf,
}

impl ProcessGitRunner {
    /// Create a runner executing inside `workdir`
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
        }
    }
}

impl GitRunner for ProcessGitRunner {
    fn run_with_env(&mut self, args: &[&str], env: &[(&str, &str)]) -> Result<GitOutput> {
        let mut command = Command::new("git");
        command.args(args).current_dir(&self.workdir);
        for (key, value) in env {
            command.env(key, value);
        }

        let output = command.output().map_err(|e| Error::Git {
            step: "spawn".to_string(),
            output: GitOutput {
                exit_code: None,
                stdout: String::new(),
                stderr: format!("failed to spawn git: {e}"),
            },
        })?;

        Ok(GitOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
