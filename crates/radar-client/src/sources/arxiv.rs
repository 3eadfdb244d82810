//! arXiv Atom feed adapter.

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;
use quick_xml::de::from_str;
use radar_core::config::RadarConfig;
use radar_core::context::RunContext;
use radar_core::error::AppError;
use radar_core::merge::sort_newest_first;
use radar_core::models::{NormalizedRecord, Source};
use radar_core::retry::fetch_or_skip;
use radar_core::text::collapse_whitespace;
use radar_core::traits::{Fetcher, SourceAdapter};
use serde::Deserialize;

use super::{pause, with_query};

const API_URL: &str = "http://export.arxiv.org/api/query";
const MAX_RESULTS: &str = "20";
/// Extra days on top of the lookback window; listings lag submission.
const WINDOW_SLACK_DAYS: i64 = 2;
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(3);

// ---- Atom wire types ----

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    published: String,
    #[serde(rename = "author", default)]
    authors: Vec<Author>,
    #[serde(rename = "category", default)]
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct Author {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(rename = "@term")]
    term: String,
}

impl Entry {
    /// `None` when the entry has no usable publication date.
    fn into_record(self, keyword: &str) -> Option<NormalizedRecord> {
        let id = match self.id.rsplit_once("/abs/") {
            Some((_, id)) => id.to_string(),
            None => self.id.clone(),
        };
        let published = NaiveDate::parse_from_str(self.published.get(..10)?, "%Y-%m-%d").ok()?;
        let link = format!("https://arxiv.org/abs/{id}");

        Some(
            NormalizedRecord::new(
                Source::Arxiv,
                id,
                collapse_whitespace(&self.title),
                link,
                published,
                keyword,
            )
            .with_summary(&collapse_whitespace(&self.summary))
            .with_authors(self.authors.into_iter().map(|a| a.name).collect())
            .with_categories(self.categories.into_iter().map(|c| c.term).collect()),
        )
    }
}

fn parse_feed(xml: &str) -> Result<Vec<Entry>, AppError> {
    let feed: Feed = from_str(xml).map_err(|e| AppError::parse("arxiv", e))?;
    Ok(feed.entries)
}

/// Search URL for one keyword restricted to the configured categories.
pub fn query_url(categories: &[String], keyword: &str) -> String {
    let cats = categories
        .iter()
        .map(|c| format!("cat:{c}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    let search = format!("({cats}) AND all:\"{keyword}\"");
    with_query(
        API_URL,
        &[
            ("search_query", search.as_str()),
            ("start", "0"),
            ("max_results", MAX_RESULTS),
            ("sortBy", "submittedDate"),
            ("sortOrder", "descending"),
        ],
    )
}

/// Recent papers per keyword across the configured categories.
#[derive(Clone)]
pub struct ArxivAdapter<F> {
    fetcher: F,
    pause: Duration,
}

impl<F: Fetcher> ArxivAdapter<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            pause: DEFAULT_PAUSE,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }
}

impl<F: Fetcher> SourceAdapter for ArxivAdapter<F> {
    fn source(&self) -> Source {
        Source::Arxiv
    }

    async fn produce(&self, config: &RadarConfig, ctx: &RunContext) -> Vec<NormalizedRecord> {
        let window = i64::from(config.lookback_days) + WINDOW_SLACK_DAYS;
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for keyword in &config.arxiv_keywords {
            let url = query_url(&config.arxiv_categories, keyword);
            if let Some(body) = fetch_or_skip(&self.fetcher, &url, &[]).await {
                match parse_feed(&body) {
                    Ok(entries) => {
                        for record in entries.into_iter().filter_map(|e| e.into_record(keyword)) {
                            if !seen.insert(record.id.clone()) {
                                continue;
                            }
                            if ctx.is_recent_date(record.published, window) {
                                records.push(record);
                            }
                        }
                    }
                    Err(e) => tracing::warn!(keyword = %keyword, error = %e, "Skipping arXiv response"),
                }
            }
            pause(self.pause).await;
        }

        sort_newest_first(&mut records);
        tracing::info!(count = records.len(), "Fetched arXiv papers");
        records
    }
}
