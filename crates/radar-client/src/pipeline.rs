//! The two run paths: research sources and faculty jobs.
//!
//! Adapters run one after another; each run writes only the snapshot
//! sections it owns.

use std::cmp::Reverse;
use std::time::Duration;

use radar_core::config::RadarConfig;
use radar_core::context::RunContext;
use radar_core::error::AppError;
use radar_core::merge::{dedup_by_title, order_job_listings};
use radar_core::models::{NormalizedRecord, OutputDocument, Source};
use radar_core::region::Region;
use radar_core::snapshot::SnapshotStore;
use radar_core::traits::{Fetcher, SourceAdapter};
use serde_json::Map;

use crate::sources::{
    ArxivAdapter, FacultyJobsAdapter, HackerNewsAdapter, RedditAdapter, SemanticScholarAdapter,
};

/// The four research adapters, sharing one fetcher.
pub struct PrimaryAdapters<F> {
    pub arxiv: ArxivAdapter<F>,
    pub semantic_scholar: SemanticScholarAdapter<F>,
    pub hackernews: HackerNewsAdapter<F>,
    pub reddit: RedditAdapter<F>,
}

impl<F: Fetcher> PrimaryAdapters<F> {
    pub fn new(fetcher: F, s2_api_key: Option<String>) -> Self {
        Self {
            arxiv: ArxivAdapter::new(fetcher.clone()),
            semantic_scholar: SemanticScholarAdapter::new(fetcher.clone()).with_api_key(s2_api_key),
            hackernews: HackerNewsAdapter::new(fetcher.clone()),
            reddit: RedditAdapter::new(fetcher),
        }
    }

    /// Same pause for every adapter.
    pub fn with_pause(self, pause: Duration) -> Self {
        Self {
            arxiv: self.arxiv.with_pause(pause),
            semantic_scholar: self.semantic_scholar.with_pause(pause),
            hackernews: self.hackernews.with_pause(pause),
            reddit: self.reddit.with_pause(pause),
        }
    }
}

async fn run_adapter<A: SourceAdapter>(
    adapter: &A,
    config: &RadarConfig,
    ctx: &RunContext,
    document: &mut OutputDocument,
) {
    let source = adapter.source();
    tracing::info!(source = %source, "Fetching");
    let records = adapter.produce(config, ctx).await;
    document.insert(source, records);
}

/// Run arXiv, Semantic Scholar, HackerNews and Reddit in that order.
pub async fn collect_primary<F: Fetcher>(
    adapters: &PrimaryAdapters<F>,
    config: &RadarConfig,
    ctx: &RunContext,
) -> OutputDocument {
    let mut document = OutputDocument::new(config, ctx);
    run_adapter(&adapters.arxiv, config, ctx, &mut document).await;
    run_adapter(&adapters.semantic_scholar, config, ctx, &mut document).await;
    run_adapter(&adapters.hackernews, config, ctx, &mut document).await;
    run_adapter(&adapters.reddit, config, ctx, &mut document).await;
    document
}

/// Collect the research sources, merge them into the snapshot and write
/// today's archive of the merged snapshot.
pub async fn run_primary<F: Fetcher>(
    adapters: &PrimaryAdapters<F>,
    config: &RadarConfig,
    ctx: &RunContext,
    store: &SnapshotStore,
) -> Result<OutputDocument, AppError> {
    let document = collect_primary(adapters, config, ctx).await;
    let merged = store.update(&document).await?;
    store.write_archive(ctx.today(), &merged).await?;
    tracing::info!(total = document.total_items(), "Primary run complete");
    Ok(document)
}

/// Deduplicated job listings, live listings first.
pub async fn collect_jobs<F: Fetcher>(
    adapter: &FacultyJobsAdapter<F>,
    config: &RadarConfig,
    ctx: &RunContext,
) -> Vec<NormalizedRecord> {
    let mut jobs = dedup_by_title(adapter.produce(config, ctx).await);
    order_job_listings(&mut jobs);
    jobs
}

/// Collect job listings and replace only the `faculty_jobs` section of
/// the snapshot.
pub async fn run_jobs<F: Fetcher>(
    adapter: &FacultyJobsAdapter<F>,
    config: &RadarConfig,
    ctx: &RunContext,
    store: &SnapshotStore,
) -> Result<Vec<NormalizedRecord>, AppError> {
    let jobs = collect_jobs(adapter, config, ctx).await;
    let mut updates = Map::new();
    updates.insert(
        Source::FacultyJobs.as_str().to_string(),
        serde_json::to_value(&jobs)?,
    );
    store.update_sections(updates).await?;
    tracing::info!(total = jobs.len(), "Jobs run complete");
    Ok(jobs)
}

/// Listing count per region, most frequent first. Ties keep the order in
/// which regions first appear.
pub fn region_counts(jobs: &[NormalizedRecord]) -> Vec<(Region, usize)> {
    let mut counts: Vec<(Region, usize)> = Vec::new();
    for region in jobs.iter().map(|j| j.extras.region.unwrap_or(Region::Global)) {
        match counts.iter_mut().find(|(r, _)| *r == region) {
            Some((_, n)) => *n += 1,
            None => counts.push((region, 1)),
        }
    }
    counts.sort_by_key(|(_, n)| Reverse(*n));
    counts
}
