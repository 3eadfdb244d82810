use std::time::Duration;

use radar_core::error::AppError;
use radar_core::traits::{Fetcher, Headers};
use reqwest::Client;

/// User-Agent sent to the research APIs.
pub const DEFAULT_USER_AGENT: &str = "ResearchRadar/1.0 (academic research tool)";

/// Desktop browser User-Agent; job pages reject obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const BROWSER_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP fetcher using reqwest.
///
/// Downloads raw response bodies with a fixed User-Agent and per-request
/// timeout. Headers passed to [`Fetcher::fetch`] override the defaults,
/// so an adapter can send its own User-Agent.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        Self::build(DEFAULT_USER_AGENT, timeout)
    }

    /// Fetcher for the job listing pages: browser User-Agent, 15s timeout.
    pub fn browser() -> Result<Self, AppError> {
        Self::build(BROWSER_USER_AGENT, BROWSER_TIMEOUT)
    }

    fn build(user_agent: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, headers: &Headers) -> Result<String, AppError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))
    }
}
