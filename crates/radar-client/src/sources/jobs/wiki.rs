//! Community-maintained faculty jobs README for the current year.

use std::sync::LazyLock;

use radar_core::context::RunContext;
use radar_core::models::{JobOrigin, NormalizedRecord};
use radar_core::region::classify_region;
use radar_core::retry::fetch_or_skip;
use radar_core::traits::Fetcher;
use regex::Regex;

use super::job_record;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("static regex is valid"));

static DEADLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}[-/]\d{1,2}[-/]\d{1,2}|\w+ \d{1,2},? \d{4}").expect("static regex is valid")
});

/// Topics worth keeping.
static RELEVANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)human.?computer|HCI|artificial.?intelligence|machine.?learning|NLP|natural.?language|software.?engineering|data.?science|computer.?science|interactive|UX|human.?AI|information.?science|intelligent.?systems",
    )
    .expect("static regex is valid")
});

/// README locations to try, in order.
pub fn candidate_urls(year: i32) -> [String; 2] {
    [
        format!(
            "https://raw.githubusercontent.com/academic-cs-jobs/cs-faculty-jobs-{year}/main/README.md"
        ),
        format!(
            "https://raw.githubusercontent.com/jxmorris12/cs-faculty-jobs-{year}/main/README.md"
        ),
    ]
}

/// Listings from the first candidate that yields any.
pub async fn fetch_listings<F: Fetcher>(fetcher: &F, ctx: &RunContext) -> Vec<NormalizedRecord> {
    for url in candidate_urls(ctx.year()) {
        let Some(content) = fetch_or_skip(fetcher, &url, &[]).await else {
            continue;
        };
        let jobs = parse_readme(&content, ctx);
        if !jobs.is_empty() {
            tracing::info!(url = %url, count = jobs.len(), "Using wiki listings");
            return jobs;
        }
    }
    Vec::new()
}

/// Table rows of the README: `| University | Area | ... |`.
pub fn parse_readme(content: &str, ctx: &RunContext) -> Vec<NormalizedRecord> {
    let year = ctx.year();
    content
        .lines()
        .filter_map(|line| parse_row(line, year, ctx))
        .collect()
}

fn parse_row(line: &str, year: i32, ctx: &RunContext) -> Option<NormalizedRecord> {
    let trimmed = line.trim();
    if !line.contains('|') || trimmed.starts_with("|--") || trimmed.starts_with("| ---") {
        return None;
    }
    let cells: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if cells.len() < 3 {
        return None;
    }

    let university = cells[0];
    let lower = university.to_lowercase();
    if lower.contains("university") || lower.contains("institution") {
        return None;
    }

    let full_text = cells.join(" ");
    let area = cells[1];
    if !RELEVANT.is_match(&full_text) && !area.to_lowercase().contains("cs") {
        return None;
    }

    let (name, link) = match MARKDOWN_LINK.captures(line) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (
            university.to_string(),
            format!("https://github.com/academic-cs-jobs/cs-faculty-jobs-{year}"),
        ),
    };
    let deadline = cells.iter().find(|c| DEADLINE.is_match(c));
    let summary = match deadline {
        Some(d) => format!("{area} | Deadline: {d}"),
        None => area.to_string(),
    };

    Some(job_record(
        format!("{name} — Faculty Position"),
        link,
        &summary,
        classify_region(&full_text),
        JobOrigin::GithubWiki,
        ctx,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use radar_core::region::Region;
    use radar_core::testutil::MockFetcher;

    fn ctx() -> RunContext {
        RunContext::at(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap())
    }

    const README: &str = "\
# CS Faculty Jobs 2026

| University | Area | Rank | Deadline |
|------------|------|------|----------|
| [EPFL](https://epfl.ch/jobs) | Machine Learning | Tenure-track | 2026-01-15 |
| Imperial College London | Theory | Open | rolling |
| KAIST, Korea | CS (all areas) | Assistant | March 1, 2026 |
| Some College | Chemistry | Lecturer | |
| only | two |
";

    #[test]
    fn parses_relevant_rows() {
        let jobs = parse_readme(README, &ctx());
        let titles: Vec<_> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(
            titles,
            ["EPFL — Faculty Position", "KAIST, Korea — Faculty Position"]
        );

        assert_eq!(jobs[0].link, "https://epfl.ch/jobs");
        assert_eq!(
            jobs[0].summary.as_deref(),
            Some("Machine Learning | Deadline: 2026-01-15")
        );
        assert_eq!(jobs[0].extras.region, Some(Region::Switzerland));

        assert_eq!(
            jobs[1].link,
            "https://github.com/academic-cs-jobs/cs-faculty-jobs-2026"
        );
        assert_eq!(
            jobs[1].summary.as_deref(),
            Some("CS (all areas) | Deadline: March 1, 2026")
        );
        assert_eq!(jobs[1].extras.region, Some(Region::Asia));
        assert!(jobs.iter().all(|j| j.extras.origin == Some(JobOrigin::GithubWiki)));
    }

    #[tokio::test]
    async fn falls_through_to_second_candidate() {
        let fetcher = MockFetcher::new()
            .route("academic-cs-jobs/cs-faculty-jobs-2026", "# nothing here yet\n")
            .route("jxmorris12/cs-faculty-jobs-2026", README);

        let jobs = fetch_listings(&fetcher, &ctx()).await;

        assert_eq!(jobs.len(), 2);
        assert_eq!(fetcher.requested_urls(), candidate_urls(2026));
    }

    #[tokio::test]
    async fn first_candidate_with_listings_wins() {
        let fetcher = MockFetcher::new().route("raw.githubusercontent.com", README);

        let jobs = fetch_listings(&fetcher, &ctx()).await;

        assert_eq!(jobs.len(), 2);
        assert_eq!(fetcher.requested_urls().len(), 1);
    }
}
