//! CSRankings open positions table.

use radar_core::context::RunContext;
use radar_core::error::AppError;
use radar_core::models::{JobOrigin, NormalizedRecord};
use radar_core::region::classify_region;
use radar_core::retry::fetch_or_skip;
use radar_core::text::{collapse_whitespace, truncate_chars};
use radar_core::traits::Fetcher;
use scraper::{ElementRef, Html, Selector};

use super::job_record;

pub const PAGE_URL: &str = "https://drafty.cs.brown.edu/csopenpositions/";
const SITE_ROOT: &str = "https://drafty.cs.brown.edu";
const TITLE_SUMMARY_LEN: usize = 80;

pub async fn fetch_listings<F: Fetcher>(fetcher: &F, ctx: &RunContext) -> Vec<NormalizedRecord> {
    let Some(html) = fetch_or_skip(fetcher, PAGE_URL, &[]).await else {
        return Vec::new();
    };
    match parse_listings(&html, ctx) {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::warn!(error = %e, "Skipping CSRankings page");
            Vec::new()
        }
    }
}

fn selector(s: &str) -> Result<Selector, AppError> {
    Selector::parse(s).map_err(|e| AppError::parse("csrankings", format!("{e:?}")))
}

fn cell_text(cell: &ElementRef) -> String {
    collapse_whitespace(&cell.text().collect::<String>())
}

/// Rows with at least three cells: institution, area, rank and an
/// optional deadline. Header rows are recognised by their first cell.
pub fn parse_listings(html: &str, ctx: &RunContext) -> Result<Vec<NormalizedRecord>, AppError> {
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;
    let link_selector = selector("a[href]")?;

    let document = Html::parse_document(html);
    let mut jobs = Vec::new();

    for row in document.select(&row_selector) {
        let cells: Vec<String> = row.select(&cell_selector).map(|c| cell_text(&c)).collect();
        let [institution, area, rank, rest @ ..] = cells.as_slice() else {
            continue;
        };
        if institution.is_empty() || institution.to_lowercase().contains("institution") {
            continue;
        }
        let deadline = rest.first().map(String::as_str).unwrap_or_default();

        let href = row
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default();
        let link = if href.starts_with("http") {
            href.to_string()
        } else if !href.is_empty() {
            format!("{SITE_ROOT}{href}")
        } else {
            PAGE_URL.to_string()
        };

        let mut summary = if rank.is_empty() {
            "Faculty position".to_string()
        } else {
            format!("{rank} position")
        };
        if !area.is_empty() {
            summary.push_str(&format!(" in {area}"));
        }
        if !deadline.is_empty() {
            summary.push_str(&format!(" | Deadline: {deadline}"));
        }

        let region = classify_region(&format!("{institution} {area} {rank}"));
        let title = format!(
            "{institution} — {}",
            truncate_chars(&summary, TITLE_SUMMARY_LEN)
        );
        jobs.push(job_record(
            title,
            link,
            &summary,
            region,
            JobOrigin::CsRankings,
            ctx,
        ));
    }

    Ok(jobs)
}
