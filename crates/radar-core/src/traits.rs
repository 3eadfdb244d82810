use std::future::Future;

use crate::config::RadarConfig;
use crate::context::RunContext;
use crate::error::AppError;
use crate::models::{NormalizedRecord, Source};

/// Extra request headers as (name, value) pairs.
pub type Headers = [(&'static str, String)];

/// Fetches the raw body of a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(
        &self,
        url: &str,
        headers: &Headers,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Turns one upstream service into normalized records.
///
/// Adapters never fail: a query whose fetch or parse fails contributes
/// nothing and the adapter moves on to the next one.
pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> Source;

    fn produce(
        &self,
        config: &RadarConfig,
        ctx: &RunContext,
    ) -> impl Future<Output = Vec<NormalizedRecord>> + Send;
}
