//! Faculty job listings.
//!
//! Three feeds are concatenated in a fixed order: the CSRankings open
//! positions table, the community wiki for the current year, and the
//! curated board links. Duplicates across feeds are removed later by
//! [`dedup_by_title`](radar_core::merge::dedup_by_title).

pub mod boards;
pub mod csrankings;
pub mod wiki;

use radar_core::config::RadarConfig;
use radar_core::context::RunContext;
use radar_core::merge::title_key;
use radar_core::models::{JobOrigin, NormalizedRecord, RecordExtras, Source};
use radar_core::region::Region;
use radar_core::traits::{Fetcher, SourceAdapter};

/// Job summaries are kept shorter than paper abstracts.
pub const JOB_SUMMARY_CAP: usize = 300;

/// Live listings plus curated boards.
///
/// Give it a fetcher without retries; the listing pages are best effort.
#[derive(Clone)]
pub struct FacultyJobsAdapter<F> {
    fetcher: F,
}

impl<F: Fetcher> FacultyJobsAdapter<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

impl<F: Fetcher> SourceAdapter for FacultyJobsAdapter<F> {
    fn source(&self) -> Source {
        Source::FacultyJobs
    }

    async fn produce(&self, _config: &RadarConfig, ctx: &RunContext) -> Vec<NormalizedRecord> {
        let mut jobs = csrankings::fetch_listings(&self.fetcher, ctx).await;
        tracing::info!(count = jobs.len(), "Fetched CSRankings listings");

        let wiki = wiki::fetch_listings(&self.fetcher, ctx).await;
        tracing::info!(count = wiki.len(), "Fetched wiki listings");
        jobs.extend(wiki);

        jobs.extend(boards::curated_boards(ctx));
        jobs
    }
}

/// Shared shape of every job record. The id is the title's dedup key and
/// the region label doubles as the matched keyword.
pub(crate) fn job_record(
    title: String,
    link: String,
    summary: &str,
    region: Region,
    origin: JobOrigin,
    ctx: &RunContext,
) -> NormalizedRecord {
    NormalizedRecord::new(
        Source::FacultyJobs,
        title_key(&title),
        title,
        link,
        ctx.today(),
        region.label(),
    )
    .with_summary_capped(summary, JOB_SUMMARY_CAP)
    .with_extras(RecordExtras {
        region: Some(region),
        origin: Some(origin),
        ts: Some(ctx.now().timestamp()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use radar_core::testutil::MockFetcher;

    #[tokio::test]
    async fn unreachable_pages_still_yield_boards() {
        let ctx = RunContext::at(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap());
        let fetcher = MockFetcher::new();
        let adapter = FacultyJobsAdapter::new(fetcher.clone());

        let jobs = adapter.produce(&RadarConfig::default(), &ctx).await;

        assert_eq!(jobs.len(), boards::BOARDS.len());
        assert!(jobs.iter().all(|j| j.extras.origin == Some(JobOrigin::Board)));
        // CSRankings page plus both wiki candidates
        assert_eq!(fetcher.requested_urls().len(), 3);
    }

    #[test]
    fn job_record_uses_region_as_keyword() {
        let ctx = RunContext::at(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap());
        let record = job_record(
            "ETH Zurich — Faculty Position".into(),
            "https://ethz.ch".into(),
            &"z".repeat(400),
            Region::Switzerland,
            JobOrigin::GithubWiki,
            &ctx,
        );
        assert_eq!(record.id, "ethzurichfacultyposition");
        assert_eq!(record.matched_keyword, "🇨🇭 Switzerland");
        assert_eq!(record.summary.unwrap().len(), 300);
        assert_eq!(record.extras.ts, Some(ctx.now().timestamp()));
        assert_eq!(record.published, ctx.today());
    }
}
