pub mod fetcher;
pub mod pipeline;
pub mod sources;

pub use fetcher::ReqwestFetcher;
pub use pipeline::{PrimaryAdapters, region_counts, run_jobs, run_primary};
pub use sources::{
    ArxivAdapter, FacultyJobsAdapter, HackerNewsAdapter, RedditAdapter, SemanticScholarAdapter,
};
