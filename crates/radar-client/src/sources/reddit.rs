//! Subreddit "new" listings filtered by keyword.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::time::Duration;

use chrono::DateTime;
use radar_core::config::RadarConfig;
use radar_core::context::RunContext;
use radar_core::models::{NormalizedRecord, RecordExtras, Source};
use radar_core::retry::fetch_or_skip;
use radar_core::text::first_matching_keyword;
use radar_core::traits::{Fetcher, SourceAdapter};
use serde::Deserialize;

use super::{parse_json, pause};

/// Reddit throttles generic clients; identify ourselves explicitly.
const USER_AGENT: &str = "ResearchRadar/1.0 (academic research aggregator)";
const LISTING_LIMIT: u32 = 50;
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    #[serde(default)]
    created_utc: f64,
}

pub fn listing_url(subreddit: &str) -> String {
    format!("https://www.reddit.com/r/{subreddit}/new.json?limit={LISTING_LIMIT}")
}

/// Recent posts from the configured subreddits that mention a keyword.
#[derive(Clone)]
pub struct RedditAdapter<F> {
    fetcher: F,
    pause: Duration,
}

impl<F: Fetcher> RedditAdapter<F> {
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

impl Post {
    fn into_record(
        self,
        subreddit: &str,
        keywords: &[String],
        ctx: &RunContext,
        window_days: i64,
    ) -> Option<NormalizedRecord> {
        let combined = format!("{} {}", self.title, self.selftext);
        let keyword = first_matching_keyword(&combined, keywords)?;

        let created = self.created_utc as i64;
        if !ctx.is_recent_timestamp(created, window_days) {
            return None;
        }
        let published = DateTime::from_timestamp(created, 0)?.date_naive();

        Some(
            NormalizedRecord::new(
                Source::Reddit,
                self.id,
                self.title,
                format!("https://reddit.com{}", self.permalink),
                published,
                keyword,
            )
            .with_extras(RecordExtras {
                score: Some(self.score),
                comments: Some(self.num_comments),
                subreddit: Some(subreddit.to_string()),
                ..Default::default()
            }),
        )
    }
}

impl<F: Fetcher> SourceAdapter for RedditAdapter<F> {
    fn source(&self) -> Source {
        Source::Reddit
    }

    async fn produce(&self, config: &RadarConfig, ctx: &RunContext) -> Vec<NormalizedRecord> {
        let headers = [("User-Agent", USER_AGENT.to_string())];
        let window = i64::from(config.lookback_days);
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for subreddit in &config.reddit_subreddits {
            let url = listing_url(subreddit);
            if let Some(body) = fetch_or_skip(&self.fetcher, &url, &headers).await {
                match parse_json::<Listing>("reddit", &body) {
                    Ok(listing) => {
                        for child in listing.data.children {
                            if seen.contains(&child.data.id) {
                                continue;
                            }
                            let id = child.data.id.clone();
                            if let Some(record) =
                                child
                                    .data
                                    .into_record(subreddit, &config.reddit_keywords, ctx, window)
                            {
                                seen.insert(id);
                                records.push(record);
                            }
                        }
                    }
                    Err(e) => tracing::warn!(subreddit = %subreddit, error = %e, "Skipping Reddit response"),
                }
            }
            pause(self.pause).await;
        }

        records.sort_by_key(|r| Reverse(r.extras.score.unwrap_or(0)));
        tracing::info!(count = records.len(), "Fetched Reddit posts");
        records
    }
}
