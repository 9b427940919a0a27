//! Bounded polling support
//!
//! The platform computes a pull request's mergeability asynchronously after
//! creation or update, so the one eventually-consistent field the bot reads
//! (`rebaseable`) may not exist yet. The policy (attempt budget, interval)
//! is separated from the HTTP call it drives.

use crate::error::Result;
use std::time::Duration;

/// Attempt budget and spacing for a bounded poll
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Fixed sleep between attempts
    pub interval: Duration,
}

impl Default for RetryPolicy {
    /// Six attempts, ten seconds apart: up to ~50s for GitHub to finish
    /// computing mergeability.
    fn default() -> Self {
        Self {
            max_attempts: 6,
            interval: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A policy that never sleeps, for tests
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            interval: Duration::ZERO,
        }
    }
}

/// Run `attempt` until `settled` accepts its output or the budget runs out.
///
/// Sleeps `policy.interval` only between attempts, never after the last one.
/// Returns the final output either way; the caller decides what an
/// unsettled result means. Errors from `attempt` propagate immediately.
pub async fn poll_until<T, F, Fut, P>(policy: &RetryPolicy, mut attempt: F, settled: P) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    let mut last = attempt().await?;
    for _ in 1..policy.max_attempts {
        if settled(&last) {
            return Ok(last);
        }
        tokio::time::sleep(policy.interval).await;
        last = attempt().await?;
    }
    Ok(last)
}
