//! Test utilities: a scriptable [`Fetcher`].
//!
//! Handwritten mock for dependency injection in unit and integration
//! tests. State sits behind `Arc<Mutex<_>>` so clones share it and tests
//! can assert on the recorded requests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::traits::{Fetcher, Headers};

/// A request seen by [`MockFetcher`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Mock fetcher with two answer sources:
///
/// 1. a FIFO queue of one-shot responses, consumed first;
/// 2. sticky routes matched by URL substring, first match wins.
///
/// A URL matching neither gets an `HTTP 404` error.
#[derive(Clone, Default)]
pub struct MockFetcher {
    queue: Arc<Mutex<VecDeque<Result<String, AppError>>>>,
    routes: Arc<Mutex<Vec<(String, Result<String, String>)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        let fetcher = Self::default();
        fetcher.queue.lock().unwrap().extend(responses);
        fetcher
    }

    /// Answer every URL containing `pattern` with `body`.
    pub fn route(self, pattern: &str, body: impl Into<String>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((pattern.to_string(), Ok(body.into())));
        self
    }

    /// Fail every URL containing `pattern` with an HTTP error.
    pub fn fail(self, pattern: &str, message: &str) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((pattern.to_string(), Err(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str, headers: &Headers) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.to_vec(),
        });

        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return response;
        }

        let routes = self.routes.lock().unwrap();
        match routes.iter().find(|(pattern, _)| url.contains(pattern.as_str())) {
            Some((_, Ok(body))) => Ok(body.clone()),
            Some((_, Err(message))) => Err(AppError::HttpError(message.clone())),
            None => Err(AppError::HttpError(format!("HTTP 404 for {url}"))),
        }
    }
}
