//! Semantic Scholar Graph API adapter: keyword search plus tracked authors.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;
use radar_core::config::RadarConfig;
use radar_core::context::RunContext;
use radar_core::models::{NormalizedRecord, RecordExtras, Source};
use radar_core::retry::fetch_or_skip;
use radar_core::traits::{Fetcher, SourceAdapter};
use serde::Deserialize;

use super::{parse_json, pause, with_query};

const API_BASE: &str = "https://api.semanticscholar.org/graph/v1";
const FIELDS: &str = "title,authors,abstract,year,url,publicationDate,citationCount";
const SEARCH_LIMIT: &str = "10";
const AUTHOR_LIMIT: &str = "5";
/// Keyword hits may be this many lookback windows old.
const KEYWORD_WINDOW_FACTOR: i64 = 4;
/// Tracked authors' papers are kept for a fixed 60 days.
const AUTHOR_WINDOW_DAYS: i64 = 60;
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

// ---- Graph API wire types ----

#[derive(Debug, Deserialize)]
struct PaperPage {
    #[serde(default)]
    data: Vec<Paper>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paper {
    #[serde(default)]
    paper_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Vec<PaperAuthor>,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    publication_date: Option<String>,
    #[serde(default)]
    citation_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PaperAuthor {
    #[serde(default)]
    name: Option<String>,
}

/// One lookup and the rules applied to its results.
struct Query {
    url: String,
    matched: String,
    window_days: i64,
}

/// Papers by keyword (current year only) and by tracked author.
#[derive(Clone)]
pub struct SemanticScholarAdapter<F> {
    fetcher: F,
    api_key: Option<String>,
    pause: Duration,
}

impl<F: Fetcher> SemanticScholarAdapter<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            api_key: None,
            pause: DEFAULT_PAUSE,
        }
    }

    /// Send `x-api-key` with every request. Blank keys are ignored.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    fn queries(&self, config: &RadarConfig, ctx: &RunContext) -> Vec<Query> {
        let year = ctx.year().to_string();
        let year_range = format!("{year}-{year}");
        let keyword_window = i64::from(config.lookback_days) * KEYWORD_WINDOW_FACTOR;

        let keywords = config.s2_keywords.iter().map(|keyword| Query {
            url: with_query(
                &format!("{API_BASE}/paper/search"),
                &[
                    ("query", keyword.as_str()),
                    ("limit", SEARCH_LIMIT),
                    ("fields", FIELDS),
                    ("year", year_range.as_str()),
                ],
            ),
            matched: keyword.clone(),
            window_days: keyword_window,
        });
        let authors = config.tracked_authors.iter().map(|author| Query {
            url: with_query(
                &format!("{API_BASE}/author/{}/papers", author.id),
                &[("limit", AUTHOR_LIMIT), ("fields", FIELDS)],
            ),
            matched: format!("author:{}", author.name),
            window_days: AUTHOR_WINDOW_DAYS,
        });
        keywords.chain(authors).collect()
    }
}

impl Paper {
    fn id(&self) -> Option<&str> {
        self.paper_id.as_deref().filter(|id| !id.is_empty())
    }

    /// `None` for papers without an id or outside the window. A missing
    /// or malformed date is replaced by the run date.
    fn into_record(self, query: &Query, ctx: &RunContext) -> Option<NormalizedRecord> {
        let id = self.paper_id.filter(|id| !id.is_empty())?;
        let published = match self
            .publication_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        {
            Some(date) if !ctx.is_recent_date(date, query.window_days) => return None,
            Some(date) => date,
            None => ctx.today(),
        };
        let link = self
            .url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("https://www.semanticscholar.org/paper/{id}"));

        Some(
            NormalizedRecord::new(
                Source::SemanticScholar,
                id,
                self.title.unwrap_or_default(),
                link,
                published,
                query.matched.as_str(),
            )
            .with_summary(self.abstract_text.as_deref().unwrap_or_default())
            .with_authors(self.authors.into_iter().filter_map(|a| a.name).collect())
            .with_extras(RecordExtras {
                citations: Some(self.citation_count.unwrap_or(0)),
                ..Default::default()
            }),
        )
    }
}

impl<F: Fetcher> SourceAdapter for SemanticScholarAdapter<F> {
    fn source(&self) -> Source {
        Source::SemanticScholar
    }

    async fn produce(&self, config: &RadarConfig, ctx: &RunContext) -> Vec<NormalizedRecord> {
        let headers: Vec<(&'static str, String)> = self
            .api_key
            .iter()
            .map(|key| ("x-api-key", key.clone()))
            .collect();
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for query in self.queries(config, ctx) {
            if let Some(body) = fetch_or_skip(&self.fetcher, &query.url, &headers).await {
                match parse_json::<PaperPage>("semantic_scholar", &body) {
                    Ok(page) => {
                        for paper in page.data {
                            // Seen before the window check: a paper one query
                            // rejects stays rejected for the rest of the run.
                            let Some(id) = paper.id() else { continue };
                            if !seen.insert(id.to_string()) {
                                continue;
                            }
                            records.extend(paper.into_record(&query, ctx));
                        }
                    }
                    Err(e) => tracing::warn!(query = %query.matched, error = %e, "Skipping Semantic Scholar response"),
                }
            }
            pause(self.pause).await;
        }

        records.sort_by_key(|r| Reverse(r.published));
        tracing::info!(count = records.len(), "Fetched Semantic Scholar papers");
        records
    }
}
