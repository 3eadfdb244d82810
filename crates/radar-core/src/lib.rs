pub mod config;
pub mod context;
pub mod error;
pub mod merge;
pub mod models;
pub mod region;
pub mod retry;
pub mod snapshot;
pub mod text;
pub mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use config::{RadarConfig, TrackedAuthor};
pub use context::RunContext;
pub use error::AppError;
pub use models::{JobOrigin, NormalizedRecord, OutputDocument, RecordExtras, Source};
pub use region::{Region, classify_region};
pub use retry::{RetryPolicy, RetryingFetcher, fetch_or_skip};
pub use snapshot::SnapshotStore;
pub use traits::{Fetcher, SourceAdapter};
