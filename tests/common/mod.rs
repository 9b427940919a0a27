//! Shared test fixtures

#![allow(dead_code, unused_imports)]

mod mock_git;
mod mock_platform;

pub use mock_git::{GitCall, RecordingGitRunner};
pub use mock_platform::MockPlatformService;

use rebase_bot::git::{GitOrchestrator, GitSettings};
use rebase_bot::types::{InvocationContext, PullRequestInfo};
use std::path::PathBuf;

/// A PR fixture with the rebaseable flag in a given state
pub fn make_pr(rebaseable: Option<bool>) -> PullRequestInfo {
    PullRequestInfo {
        base_repo: "acme/widgets".to_string(),
        base_ref: "main".to_string(),
        head_repo: "octocat/widgets".to_string(),
        head_ref: "feature".to_string(),
        user_login: "octocat".to_string(),
        rebaseable,
    }
}

/// An invocation context pointed at the fixture repository
pub fn make_context() -> InvocationContext {
    InvocationContext {
        repository: "acme/widgets".to_string(),
        pr_number: 42,
        token: "test-token".to_string(),
        event_login: None,
        autosquash: false,
        workdir: PathBuf::from("/tmp/checkout"),
        host: None,
    }
}

/// An orchestrator over a recording runner with fixture settings
pub fn make_orchestrator(runner: RecordingGitRunner) -> GitOrchestrator<RecordingGitRunner> {
    GitOrchestrator::new(
        runner,
        GitSettings {
            workdir: PathBuf::from("/tmp/checkout"),
            host: "github.com".to_string(),
            token: "test-token".to_string(),
            origin_repo: "acme/widgets".to_string(),
        },
    )
}
