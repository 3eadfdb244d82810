//! Run configuration parsed from the operator's markdown document.
//!
//! Only the part of the document after [`CONFIG_MARKER`] is read. Each
//! setting lives under its own `### Heading`; a missing or empty heading
//! keeps the built-in default for that field, and a missing file or
//! marker yields [`RadarConfig::default`].

use std::path::Path;

use crate::error::AppError;
use crate::models::LinkRow;

/// Heading that starts the machine-readable part of the document.
pub const CONFIG_MARKER: &str = "## Research Radar Scan Config";

const ARXIV_CATEGORIES: &str = "arXiv Categories";
const ARXIV_KEYWORDS: &str = "arXiv Keywords";
const S2_KEYWORDS: &str = "Semantic Scholar Keywords";
const S2_TRACKED_AUTHORS: &str = "Semantic Scholar Tracked Authors";
const HN_KEYWORDS: &str = "HackerNews Keywords";
const REDDIT_SUBREDDITS: &str = "Reddit Subreddits";
const REDDIT_KEYWORDS: &str = "Reddit Filter Keywords";
const LOOKBACK_WINDOW: &str = "Lookback Window";
const BLOGS: &str = "Company / Lab Blogs";
const NEWSLETTERS: &str = "Newsletters / Personal Blogs";
const RESEARCHERS: &str = "Recommended Follows";
const PODCASTS: &str = "Podcasts";
const CONFERENCES: &str = "Conferences / Workshops";

/// Longest accepted lookback window, in days.
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

/// An author whose recent papers are always looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedAuthor {
    pub name: String,
    /// Semantic Scholar author id (digits only).
    pub id: String,
}

/// Immutable configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarConfig {
    pub arxiv_categories: Vec<String>,
    pub arxiv_keywords: Vec<String>,
    pub s2_keywords: Vec<String>,
    pub tracked_authors: Vec<TrackedAuthor>,
    pub hn_keywords: Vec<String>,
    pub reddit_subreddits: Vec<String>,
    pub reddit_keywords: Vec<String>,
    pub lookback_days: u32,
    pub blogs: Vec<LinkRow>,
    pub newsletters: Vec<LinkRow>,
    pub researchers: Vec<LinkRow>,
    pub podcasts: Vec<LinkRow>,
    pub conferences: Vec<LinkRow>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            arxiv_categories: strings(&["cs.HC", "cs.AI", "cs.CL", "cs.SE"]),
            arxiv_keywords: strings(&["human-AI collaboration", "LLM agent", "AI agent"]),
            s2_keywords: strings(&["human-AI collaboration LLM"]),
            tracked_authors: Vec::new(),
            hn_keywords: strings(&["AI agent", "LLM agent", "human-AI"]),
            reddit_subreddits: strings(&["MachineLearning", "artificial", "LocalLLaMA"]),
            reddit_keywords: strings(&["agent", "human-AI", "agentic"]),
            lookback_days: 7,
            blogs: Vec::new(),
            newsletters: Vec::new(),
            researchers: Vec::new(),
            podcasts: Vec::new(),
            conferences: Vec::new(),
        }
    }
}

impl RadarConfig {
    /// Load from a markdown file, falling back to defaults (with a warning)
    /// when the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(text) => Self::from_markdown(&text),
            Err(e) => {
                tracing::warn!(error = %e, "Using default configuration");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<String, AppError> {
        if !path.exists() {
            return Err(AppError::ConfigError(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })
    }

    /// Parse the config section of a markdown document.
    pub fn from_markdown(doc: &str) -> Self {
        let mut config = Self::default();

        let Some(idx) = doc.find(CONFIG_MARKER) else {
            tracing::warn!(marker = CONFIG_MARKER, "Config section not found, using defaults");
            return config;
        };
        let section = &doc[idx..];

        if let Some(block) = subsection(section, ARXIV_CATEGORIES) {
            config.arxiv_categories = comma_list(&block);
        }
        if let Some(block) = subsection(section, ARXIV_KEYWORDS) {
            config.arxiv_keywords = bullet_list(&block);
        }
        if let Some(block) = subsection(section, S2_KEYWORDS) {
            config.s2_keywords = bullet_list(&block);
        }
        if let Some(block) = subsection(section, S2_TRACKED_AUTHORS) {
            let authors = tracked_authors(&block);
            if !authors.is_empty() {
                config.tracked_authors = authors;
            }
        }
        if let Some(block) = subsection(section, HN_KEYWORDS) {
            config.hn_keywords = bullet_list(&block);
        }
        if let Some(block) = subsection(section, REDDIT_SUBREDDITS) {
            config.reddit_subreddits = comma_list(&block)
                .into_iter()
                .map(|s| s.strip_prefix("r/").map(str::to_string).unwrap_or(s))
                .collect();
        }
        if let Some(block) = subsection(section, REDDIT_KEYWORDS) {
            config.reddit_keywords = comma_list(&block);
        }
        if let Some(block) = subsection(section, LOOKBACK_WINDOW) {
            match block.lines().next().map(str::trim).map(str::parse::<u32>) {
                Some(Ok(days)) if days <= MAX_LOOKBACK_DAYS => config.lookback_days = days,
                _ => tracing::warn!(
                    value = %block,
                    max = MAX_LOOKBACK_DAYS,
                    "Invalid lookback window, keeping default"
                ),
            }
        }

        config.blogs = link_table(subsection(section, BLOGS).as_deref());
        config.newsletters = link_table(subsection(section, NEWSLETTERS).as_deref());
        config.researchers = link_table(subsection(section, RESEARCHERS).as_deref());
        config.podcasts = link_table(subsection(section, PODCASTS).as_deref());
        config.conferences = link_table(subsection(section, CONFERENCES).as_deref());

        config
    }
}

/// Body of `### heading` up to the next `##`/`###` heading, trimmed.
/// `None` when the heading is absent or its body is blank.
fn subsection(section: &str, heading: &str) -> Option<String> {
    let mut lines = section.lines();
    lines.by_ref().find(|line| {
        line.strip_prefix("### ")
            .is_some_and(|title| title.trim() == heading)
    })?;

    let body: Vec<&str> = lines
        .take_while(|line| !line.trim_start().starts_with("##"))
        .collect();
    let body = body.join("\n").trim().to_string();
    (!body.is_empty()).then_some(body)
}

fn bullet_list(block: &str) -> Vec<String> {
    block
        .lines()
        .filter(|line| line.trim().starts_with("- "))
        .map(|line| line.trim().trim_start_matches(['-', ' ']).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn comma_list(block: &str) -> Vec<String> {
    block
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rows of `| Name | 12345 |`; rows whose second cell is not all digits
/// (header, separator) are skipped.
fn tracked_authors(block: &str) -> Vec<TrackedAuthor> {
    block
        .lines()
        .filter_map(|line| {
            let cells: Vec<&str> = line
                .split('|')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect();
            match cells.as_slice() {
                [name, id, ..] if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) => {
                    Some(TrackedAuthor {
                        name: name.to_string(),
                        id: id.to_string(),
                    })
                }
                _ => None,
            }
        })
        .collect()
}

/// Parse a markdown table into header-keyed rows.
fn link_table(block: Option<&str>) -> Vec<LinkRow> {
    let Some(block) = block else {
        return Vec::new();
    };

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for line in block.lines().map(str::trim) {
        if !line.starts_with('|') {
            continue;
        }
        let cells = table_cells(line);
        if cells.is_empty() || cells.iter().all(|c| is_separator_cell(c)) {
            continue;
        }
        if headers.is_none() {
            headers = Some(cells);
            continue;
        }
        if let Some(keys) = &headers {
            let row: LinkRow = keys.iter().cloned().zip(cells).collect();
            rows.push(row);
        }
    }
    rows
}

/// Cells between the outer pipes of a table row.
fn table_cells(line: &str) -> Vec<String> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return Vec::new();
    }
    parts[1..parts.len() - 1]
        .iter()
        .map(|c| c.trim().to_string())
        .collect()
}

fn is_separator_cell(cell: &str) -> bool {
    cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
}
