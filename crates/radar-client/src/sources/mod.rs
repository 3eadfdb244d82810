//! One adapter per upstream service.
//!
//! Every adapter owns a [`Fetcher`](radar_core::Fetcher), decodes the
//! service's payload into private wire types, and converts them into
//! [`NormalizedRecord`](radar_core::NormalizedRecord)s. A query that fails
//! to fetch or parse is logged and skipped.

pub mod arxiv;
pub mod hackernews;
pub mod jobs;
pub mod reddit;
pub mod semantic_scholar;

use std::time::Duration;

use radar_core::error::AppError;
use serde::de::DeserializeOwned;

pub use arxiv::ArxivAdapter;
pub use hackernews::HackerNewsAdapter;
pub use jobs::FacultyJobsAdapter;
pub use reddit::RedditAdapter;
pub use semantic_scholar::SemanticScholarAdapter;

/// Politeness delay between two queries to the same service.
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

pub(crate) fn parse_json<T: DeserializeOwned>(adapter: &str, body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::parse(adapter, e))
}

/// `base?k1=v1&k2=v2` with form-encoded values.
pub(crate) fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{base}?{query}")
}
