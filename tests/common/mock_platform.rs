//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use rebase_bot::error::{Error, Result};
use rebase_bot::platform::PlatformService;
use rebase_bot::types::{PullRequestInfo, UserProfile};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Simple mock platform service with call tracking and error injection.
///
/// `pull_request` responses are queued so tests can script the rebaseable
/// poll (e.g. unknown, unknown, true); the last queued response repeats
/// once the queue empties.
pub struct MockPlatformService {
    latest_comment: Mutex<Option<String>>,
    pull_request_queue: Mutex<VecDeque<PullRequestInfo>>,
    profiles: Mutex<Vec<(String, UserProfile)>>,
    // Call tracking
    pub comment_calls: AtomicUsize,
    pub pull_request_calls: AtomicUsize,
    profile_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_comment: Mutex<Option<String>>,
    error_on_profile: Mutex<Option<String>>,
}

impl MockPlatformService {
    pub fn new() -> Self {
        Self {
            latest_comment: Mutex::new(None),
            pull_request_queue: Mutex::new(VecDeque::new()),
            profiles: Mutex::new(Vec::new()),
            comment_calls: AtomicUsize::new(0),
            pull_request_calls: AtomicUsize::new(0),
            profile_calls: Mutex::new(Vec::new()),
            error_on_comment: Mutex::new(None),
            error_on_profile: Mutex::new(None),
        }
    }

    /// Set the comment body returned by `latest_comment`
    pub fn set_comment(&self, body: &str) {
        *self.latest_comment.lock().unwrap() = Some(body.to_string());
    }

    /// Queue one `pull_request` response
    pub fn push_pull_request(&self, info: PullRequestInfo) {
        self.pull_request_queue.lock().unwrap().push_back(info);
    }

    /// Register a user profile for a login
    pub fn set_profile(&self, login: &str, profile: UserProfile) {
        self.profiles
            .lock()
            .unwrap()
            .push((login.to_string(), profile));
    }

    /// Make `latest_comment` return an error
    pub fn fail_comment(&self, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `user_profile` return an error
    pub fn fail_profile(&self, msg: &str) {
        *self.error_on_profile.lock().unwrap() = Some(msg.to_string());
    }

    /// Logins `user_profile` was called with
    pub fn profile_calls(&self) -> Vec<String> {
        self.profile_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn latest_comment(&self, _pr_number: u64) -> Result<String> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.error_on_comment.lock().unwrap().clone() {
            return Err(Error::transport(msg));
        }
        self.latest_comment
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::transport("no comments"))
    }

    async fn pull_request(&self, pr_number: u64) -> Result<PullRequestInfo> {
        self.pull_request_calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.pull_request_queue.lock().unwrap();
        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap())
        } else {
            queue
                .front()
                .cloned()
                .ok_or_else(|| Error::transport(format!("no PR #{pr_number} configured")))
        }
    }

    async fn user_profile(&self, login: &str) -> Result<UserProfile> {
        self.profile_calls.lock().unwrap().push(login.to_string());
        if let Some(msg) = self.error_on_profile.lock().unwrap().clone() {
            return Err(Error::transport(msg));
        }
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .iter()
            .find(|(l, _)| l == login)
            .map(|(_, p)| p.clone())
            .unwrap_or_default())
    }

    fn web_host(&self) -> &str {
        "github.com"
    }
}
