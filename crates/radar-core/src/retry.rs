//! Retry-with-backoff for any [`Fetcher`].
//!
//! [`RetryingFetcher`] repeats transport failures with a linear backoff
//! (`base_delay * attempt`). Callers that treat a failed fetch as "skip
//! this query" go through [`fetch_or_skip`], which logs and swallows the
//! final error.

use std::time::Duration;

use crate::error::AppError;
use crate::text::truncate_chars;
use crate::traits::{Fetcher, Headers};

/// How many times to try a request and how long to wait in between.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    /// Three attempts, waiting 2s then 4s.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay after a failed attempt (1-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// A [`Fetcher`] wrapper that retries transport errors.
///
/// Parse or I/O errors from the inner fetcher are returned immediately.
#[derive(Clone)]
pub struct RetryingFetcher<F> {
    inner: F,
    policy: RetryPolicy,
}

impl<F: Fetcher> RetryingFetcher<F> {
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<F: Fetcher> Fetcher for RetryingFetcher<F> {
    async fn fetch(&self, url: &str, headers: &Headers) -> Result<String, AppError> {
        let mut attempt = 1;
        loop {
            match self.inner.fetch(url, headers).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transport() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.delay_for_attempt(attempt);
                    tracing::debug!(
                        url = %truncate_chars(url, 80),
                        attempt,
                        delay_ms = %delay.as_millis(),
                        error = %e,
                        "Retrying request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::debug!(attempts = attempt, "Giving up on request");
                    return Err(e);
                }
            }
        }
    }
}

/// Fetch a URL, turning any failure into `None` after logging it.
pub async fn fetch_or_skip<F: Fetcher>(fetcher: &F, url: &str, headers: &Headers) -> Option<String> {
    match fetcher.fetch(url, headers).await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!(url = %truncate_chars(url, 80), error = %e, "Fetch failed, skipping");
            None
        }
    }
}
