//! HackerNews stories via the Algolia search API.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::time::Duration;

use chrono::DateTime;
use radar_core::config::RadarConfig;
use radar_core::context::RunContext;
use radar_core::models::{NormalizedRecord, RecordExtras, Source};
use radar_core::retry::fetch_or_skip;
use radar_core::traits::{Fetcher, SourceAdapter};
use serde::Deserialize;

use super::{parse_json, pause, with_query};

const SEARCH_URL: &str = "https://hn.algolia.com/api/v1/search";
const ITEM_URL: &str = "https://news.ycombinator.com/item?id=";
const HITS_PER_PAGE: &str = "10";
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "objectID")]
    object_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    points: Option<i64>,
    #[serde(default)]
    num_comments: Option<u64>,
    #[serde(default)]
    created_at_i: Option<i64>,
}

impl Hit {
    fn into_record(self, keyword: &str, cutoff: i64) -> Option<NormalizedRecord> {
        let created = self.created_at_i.filter(|ts| *ts >= cutoff)?;
        let published = DateTime::from_timestamp(created, 0)?.date_naive();
        let discussion = format!("{ITEM_URL}{}", self.object_id);
        let link = self
            .url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| discussion.clone());

        Some(
            NormalizedRecord::new(
                Source::Hackernews,
                self.object_id,
                self.title.unwrap_or_default(),
                link,
                published,
                keyword,
            )
            .with_extras(RecordExtras {
                points: Some(self.points.unwrap_or(0)),
                comments: Some(self.num_comments.unwrap_or(0)),
                discussion_link: Some(discussion),
                ..Default::default()
            }),
        )
    }
}

/// Stories per keyword created inside the lookback window.
#[derive(Clone)]
pub struct HackerNewsAdapter<F> {
    fetcher: F,
    pause: Duration,
}

impl<F: Fetcher> HackerNewsAdapter<F> {
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

pub fn search_url(keyword: &str, cutoff: i64) -> String {
    let filter = format!("created_at_i>{cutoff}");
    with_query(
        SEARCH_URL,
        &[
            ("query", keyword),
            ("tags", "story"),
            ("numericFilters", filter.as_str()),
            ("hitsPerPage", HITS_PER_PAGE),
        ],
    )
}

impl<F: Fetcher> SourceAdapter for HackerNewsAdapter<F> {
    fn source(&self) -> Source {
        Source::Hackernews
    }

    async fn produce(&self, config: &RadarConfig, ctx: &RunContext) -> Vec<NormalizedRecord> {
        let cutoff = ctx.cutoff(i64::from(config.lookback_days)).timestamp();
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for keyword in &config.hn_keywords {
            let url = search_url(keyword, cutoff);
            if let Some(body) = fetch_or_skip(&self.fetcher, &url, &[]).await {
                match parse_json::<SearchResponse>("hackernews", &body) {
                    Ok(response) => {
                        for hit in response.hits {
                            if !seen.insert(hit.object_id.clone()) {
                                continue;
                            }
                            records.extend(hit.into_record(keyword, cutoff));
                        }
                    }
                    Err(e) => tracing::warn!(keyword = %keyword, error = %e, "Skipping HackerNews response"),
                }
            }
            pause(self.pause).await;
        }

        records.sort_by_key(|r| Reverse(r.extras.points.unwrap_or(0)));
        tracing::info!(count = records.len(), "Fetched HackerNews stories");
        records
    }
}
