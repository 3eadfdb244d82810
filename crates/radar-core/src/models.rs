use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RadarConfig;
use crate::context::RunContext;
use crate::region::Region;
use crate::text::{truncate_chars, truncate_list};

/// Maximum stored length of a record summary, in characters.
pub const SUMMARY_CAP: usize = 500;

/// Maximum number of authors (and categories) kept per paper.
pub const AUTHOR_CAP: usize = 5;

/// Which adapter produced a record. Doubles as the snapshot section name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Arxiv,
    SemanticScholar,
    Hackernews,
    Reddit,
    FacultyJobs,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Arxiv => "arxiv",
            Source::SemanticScholar => "semantic_scholar",
            Source::Hackernews => "hackernews",
            Source::Reddit => "reddit",
            Source::FacultyJobs => "faculty_jobs",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a job listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOrigin {
    #[serde(rename = "CSRankings")]
    CsRankings,
    #[serde(rename = "GitHub Wiki")]
    GithubWiki,
    /// Static curated job board, not a live listing.
    #[serde(rename = "Board")]
    Board,
}

/// The common shape every adapter emits.
///
/// Construct through [`NormalizedRecord::new`] and the `with_*` setters so
/// the summary and author caps are always applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Serialized as `YYYY-MM-DD`.
    pub published: NaiveDate,
    pub source: Source,
    pub matched_keyword: String,
    #[serde(flatten)]
    pub extras: RecordExtras,
}

/// Adapter-specific fields. None of these are read by the merge step
/// except `origin` and `ts` for job ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordExtras {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subreddit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<JobOrigin>,
    /// Unix seconds; used to order job listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl NormalizedRecord {
    pub fn new(
        source: Source,
        id: impl Into<String>,
        title: impl Into<String>,
        link: impl Into<String>,
        published: NaiveDate,
        matched_keyword: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            link: link.into(),
            summary: None,
            published,
            source,
            matched_keyword: matched_keyword.into(),
            extras: RecordExtras::default(),
        }
    }

    /// Set the summary, truncated to [`SUMMARY_CAP`]. Empty text clears it.
    pub fn with_summary(self, summary: &str) -> Self {
        self.with_summary_capped(summary, SUMMARY_CAP)
    }

    /// Set the summary with a tighter cap than the default. The cap never
    /// exceeds [`SUMMARY_CAP`].
    pub fn with_summary_capped(mut self, summary: &str, cap: usize) -> Self {
        let cap = cap.min(SUMMARY_CAP);
        self.summary = if summary.is_empty() {
            None
        } else {
            Some(truncate_chars(summary, cap))
        };
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.extras.authors = truncate_list(authors, AUTHOR_CAP);
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.extras.categories = truncate_list(categories, AUTHOR_CAP);
        self
    }

    /// Set the metric fields. Authors and categories already set through
    /// their own setters are kept.
    pub fn with_extras(mut self, extras: RecordExtras) -> Self {
        let authors = std::mem::take(&mut self.extras.authors);
        let categories = std::mem::take(&mut self.extras.categories);
        self.extras = RecordExtras {
            authors,
            categories,
            ..extras
        };
        self
    }
}

/// One row of a curated link table, keyed by the table's header cells.
pub type LinkRow = BTreeMap<String, String>;

/// The `meta` block of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    pub fetched_at: DateTime<Utc>,
    pub lookback_days: u32,
    pub keywords: Vec<String>,
}

/// Merged output of a primary run, serialized verbatim into the snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct OutputDocument {
    pub meta: RunMeta,
    pub arxiv: Vec<NormalizedRecord>,
    pub semantic_scholar: Vec<NormalizedRecord>,
    pub hackernews: Vec<NormalizedRecord>,
    pub reddit: Vec<NormalizedRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_jobs: Option<Vec<NormalizedRecord>>,
    pub blogs: Vec<LinkRow>,
    pub newsletters: Vec<LinkRow>,
    pub researchers: Vec<LinkRow>,
    pub podcasts: Vec<LinkRow>,
    pub conferences: Vec<LinkRow>,
}

impl OutputDocument {
    /// Start a document for this run: meta block plus the pass-through
    /// link tables, with every source section empty.
    pub fn new(config: &RadarConfig, ctx: &RunContext) -> Self {
        Self {
            meta: RunMeta {
                fetched_at: ctx.now(),
                lookback_days: config.lookback_days,
                keywords: config.arxiv_keywords.clone(),
            },
            arxiv: Vec::new(),
            semantic_scholar: Vec::new(),
            hackernews: Vec::new(),
            reddit: Vec::new(),
            faculty_jobs: None,
            blogs: config.blogs.clone(),
            newsletters: config.newsletters.clone(),
            researchers: config.researchers.clone(),
            podcasts: config.podcasts.clone(),
            conferences: config.conferences.clone(),
        }
    }

    /// Replace one source's section wholesale.
    pub fn insert(&mut self, source: Source, records: Vec<NormalizedRecord>) {
        match source {
            Source::Arxiv => self.arxiv = records,
            Source::SemanticScholar => self.semantic_scholar = records,
            Source::Hackernews => self.hackernews = records,
            Source::Reddit => self.reddit = records,
            Source::FacultyJobs => self.faculty_jobs = Some(records),
        }
    }

    pub fn records(&self, source: Source) -> &[NormalizedRecord] {
        match source {
            Source::Arxiv => &self.arxiv,
            Source::SemanticScholar => &self.semantic_scholar,
            Source::Hackernews => &self.hackernews,
            Source::Reddit => &self.reddit,
            Source::FacultyJobs => self.faculty_jobs.as_deref().unwrap_or_default(),
        }
    }

    /// Number of live records across all source sections.
    pub fn total_items(&self) -> usize {
        self.arxiv.len()
            + self.semantic_scholar.len()
            + self.hackernews.len()
            + self.reddit.len()
            + self.faculty_jobs.as_ref().map_or(0, Vec::len)
    }
}
