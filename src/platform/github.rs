//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{PullRequestInfo, UserProfile};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

// REST response types for the three reads the bot performs

#[derive(Deserialize)]
struct IssueComment {
    body: Option<String>,
}

#[derive(Deserialize)]
struct PullRequestResponse {
    base: BranchRef,
    head: BranchRef,
    user: UserRef,
    rebaseable: Option<bool>,
}

#[derive(Deserialize)]
struct BranchRef {
    #[serde(rename = "ref")]
    ref_field: String,
    /// Null when the fork repository was deleted after the PR was opened
    repo: Option<RepoRef>,
}

#[derive(Deserialize)]
struct RepoRef {
    full_name: String,
}

#[derive(Deserialize)]
struct UserRef {
    login: String,
}

/// GitHub service using raw authenticated GETs
pub struct GitHubClient {
    http: Client,
    token: String,
    repository: String,
    /// API base for requests (e.g. "https://api.github.com")
    api_base: String,
    /// Host for web-facing values such as noreply emails
    web_host: String,
}

impl GitHubClient {
    /// Create a new GitHub client for one repository.
    ///
    /// `host` selects a GitHub Enterprise install; `None` targets
    /// github.com.
    pub fn new(token: &str, repository: &str, host: Option<&str>) -> Result<Self> {
        let (api_base, web_host) = match host {
            Some(h) => (format!("https://{h}/api/v3"), h.to_string()),
            None => (
                "https://api.github.com".to_string(),
                "github.com".to_string(),
            ),
        };
        Self::with_api_base(token, repository, &api_base, &web_host)
    }

    /// Create a client pointed at an explicit API base URL (proxies, tests)
    pub fn with_api_base(
        token: &str,
        repository: &str,
        api_base: &str,
        web_host: &str,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent("rebase-bot")
            .build()
            .map_err(|e| Error::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            token: token.to_string(),
            repository: repository.to_string(),
            api_base: api_base.to_string(),
            web_host: web_host.to_string(),
        })
    }

    /// Issue an authenticated GET, failing on any non-success status
    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                message: format!("GET {url} returned {status}"),
                status: Some(status.as_u16()),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl PlatformService for GitHubClient {
    async fn latest_comment(&self, pr_number: u64) -> Result<String> {
        debug!(pr_number, "fetching latest comment");
        let url = format!(
            "{}/repos/{}/issues/{pr_number}/comments",
            self.api_base, self.repository
        );

        let comments: Vec<IssueComment> = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::transport(format!("failed to parse comment list: {e}")))?;

        let body = comments
            .into_iter()
            .next_back()
            .ok_or_else(|| Error::transport(format!("no comments on PR #{pr_number}")))?
            .body
            .unwrap_or_default();

        debug!(pr_number, "fetched latest comment");
        Ok(body)
    }

    async fn pull_request(&self, pr_number: u64) -> Result<PullRequestInfo> {
        debug!(pr_number, "fetching pull request");
        let url = format!(
            "{}/repos/{}/pulls/{pr_number}",
            self.api_base, self.repository
        );

        let pr: PullRequestResponse = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::transport(format!("failed to parse pull request: {e}")))?;

        let base_repo = pr
            .base
            .repo
            .map(|r| r.full_name)
            .unwrap_or_else(|| self.repository.clone());
        let head_repo = pr
            .head
            .repo
            .map(|r| r.full_name)
            .ok_or_else(|| {
                Error::transport(format!("PR #{pr_number} head repository is gone"))
            })?;

        let info = PullRequestInfo {
            base_repo,
            base_ref: pr.base.ref_field,
            head_repo,
            head_ref: pr.head.ref_field,
            user_login: pr.user.login,
            rebaseable: pr.rebaseable,
        };
        debug!(
            pr_number,
            base = %info.base_ref,
            head = %info.head_ref,
            rebaseable = ?info.rebaseable,
            "fetched pull request"
        );
        Ok(info)
    }

    async fn user_profile(&self, login: &str) -> Result<UserProfile> {
        debug!(login, "fetching user profile");
        let url = format!("{}/users/{login}", self.api_base);

        let profile: UserProfile = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::transport(format!("failed to parse user profile: {e}")))?;

        debug!(login, "fetched user profile");
        Ok(profile)
    }

    fn web_host(&self) -> &str {
        &self.web_host
    }
}
