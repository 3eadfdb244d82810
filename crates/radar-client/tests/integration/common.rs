use std::time::Duration;

use chrono::{TimeZone, Utc};
use radar_client::PrimaryAdapters;
use radar_core::RunContext;
use radar_core::config::RadarConfig;
use radar_core::models::LinkRow;
use radar_core::testutil::MockFetcher;
use serde_json::json;

/// Every test runs at this instant.
pub fn ctx() -> RunContext {
    RunContext::at(Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap())
}

fn days_ago(days: i64) -> i64 {
    ctx().now().timestamp() - days * 86_400
}

pub fn config() -> RadarConfig {
    let mut blog = LinkRow::new();
    blog.insert("Name".into(), "Lab Blog".into());
    blog.insert("URL".into(), "https://lab.example/blog".into());
    RadarConfig {
        lookback_days: 7,
        blogs: vec![blog],
        ..RadarConfig::default()
    }
}

pub const ARXIV_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query</title>
  <entry>
    <id>http://arxiv.org/abs/2601.00001v1</id>
    <published>2026-01-08T18:00:00Z</published>
    <title>Teaming with LLM agents</title>
    <summary>A study.</summary>
    <author><name>A. Researcher</name></author>
    <category term="cs.HC"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2512.00002v2</id>
    <published>2025-12-20T18:00:00Z</published>
    <title>Too old</title>
    <summary>Outside the window.</summary>
    <author><name>B. Researcher</name></author>
    <category term="cs.AI"/>
  </entry>
</feed>"#;

pub fn s2_page() -> String {
    json!({"data": [
        {"paperId": "s2-1", "title": "Human-AI collaboration at scale", "authors": [{"name": "C. Author"}],
         "abstract": "Abstract.", "url": "https://www.semanticscholar.org/paper/s2-1",
         "publicationDate": "2026-01-02", "citationCount": 12},
        {"paperId": "s2-2", "title": "Last year", "authors": [],
         "abstract": null, "url": null, "publicationDate": "2025-10-01", "citationCount": 0}
    ]})
    .to_string()
}

pub fn hn_hits() -> String {
    json!({"hits": [
        {"objectID": "101", "title": "Show HN: agent runner", "url": "https://runner.example",
         "points": 40, "num_comments": 5, "created_at_i": days_ago(1)},
        {"objectID": "102", "title": "Agents, a retrospective", "url": null,
         "points": 80, "num_comments": 9, "created_at_i": days_ago(3)},
        {"objectID": "103", "title": "Stale", "url": null,
         "points": 900, "num_comments": 1, "created_at_i": days_ago(12)}
    ]})
    .to_string()
}

pub fn reddit_listing() -> String {
    json!({"kind": "Listing", "data": {"children": [
        {"kind": "t3", "data": {"id": "r1", "title": "Agentic workflows", "selftext": "",
         "permalink": "/r/LocalLLaMA/comments/r1/x/", "score": 12, "num_comments": 4,
         "created_utc": days_ago(2) as f64}},
        {"kind": "t3", "data": {"id": "r2", "title": "Off topic", "selftext": "cooking",
         "permalink": "/r/LocalLLaMA/comments/r2/x/", "score": 99, "num_comments": 0,
         "created_utc": days_ago(1) as f64}}
    ]}})
    .to_string()
}

pub const CSRANKINGS_PAGE: &str = r#"<table>
<tr><td>Institution</td><td>Area</td><td>Rank</td></tr>
<tr><td><a href="/csopenpositions/p/1">University of Waterloo</a></td><td>HCI</td><td>Assistant</td><td>2026-02-15</td></tr>
<tr><td>Tsinghua University, Beijing</td><td>AI</td><td>Open</td></tr>
</table>"#;

pub const WIKI_README: &str = "\
| University | Area | Rank | Deadline |
|---|---|---|---|
| [NUS Singapore](https://nus.example/jobs) | HCI | Assistant | 2026-03-01 |
| [NUS Singapore](https://nus.example/jobs) | HCI | Assistant | 2026-03-01 |
| Unrelated College | Chemistry | Lecturer | |
";

/// Fetcher that answers every service touched by the two run paths.
pub fn fetcher() -> MockFetcher {
    MockFetcher::new()
        .route("export.arxiv.org", ARXIV_FEED)
        .route("api.semanticscholar.org", s2_page())
        .route("hn.algolia.com", hn_hits())
        .route("www.reddit.com", reddit_listing())
        .route("drafty.cs.brown.edu", CSRANKINGS_PAGE)
        .route("raw.githubusercontent.com", WIKI_README)
}

pub fn primary_adapters(fetcher: MockFetcher) -> PrimaryAdapters<MockFetcher> {
    PrimaryAdapters::new(fetcher, None).with_pause(Duration::ZERO)
}
