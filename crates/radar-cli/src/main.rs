use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use radar_client::{
    FacultyJobsAdapter, PrimaryAdapters, ReqwestFetcher, region_counts, run_jobs, run_primary,
};
use radar_core::{RadarConfig, RetryPolicy, RetryingFetcher, RunContext, SnapshotStore};

#[derive(Parser)]
#[command(name = "radar", version, about = "Research signal aggregator")]
struct Cli {
    /// Markdown document holding the scan configuration
    #[arg(
        short,
        long,
        global = true,
        env = "RADAR_CONFIG",
        default_value = "information-source.md"
    )]
    config: PathBuf,

    /// Directory for latest.json and the dated archives
    #[arg(short, long, global = true, env = "RADAR_DATA_DIR", default_value = "docs/data")]
    data_dir: PathBuf,

    /// Semantic Scholar API key (optional, raises rate limits)
    #[arg(long, global = true, env = "S2_API_KEY", hide_env_values = true)]
    s2_api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch papers and posts from arXiv, Semantic Scholar, HackerNews and Reddit
    Fetch,

    /// Fetch faculty job listings and update the snapshot's job section
    Jobs,

    /// Run `fetch`, then `jobs`
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("radar=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = RadarConfig::load(&cli.config);
    let store = SnapshotStore::new(&cli.data_dir);
    let ctx = RunContext::new();

    match cli.command {
        Commands::Fetch => cmd_fetch(&config, &ctx, &store, cli.s2_api_key).await?,
        Commands::Jobs => cmd_jobs(&config, &ctx, &store).await?,
        Commands::All => {
            cmd_fetch(&config, &ctx, &store, cli.s2_api_key).await?;
            cmd_jobs(&config, &ctx, &store).await?;
        }
    }

    Ok(())
}

async fn cmd_fetch(
    config: &RadarConfig,
    ctx: &RunContext,
    store: &SnapshotStore,
    s2_api_key: Option<String>,
) -> Result<()> {
    tracing::info!(
        lookback_days = config.lookback_days,
        data_dir = %store.dir().display(),
        "Starting research fetch"
    );

    let http = ReqwestFetcher::new().context("Failed to create HTTP client")?;
    let fetcher = RetryingFetcher::new(http, RetryPolicy::default());
    let adapters = PrimaryAdapters::new(fetcher, s2_api_key);

    let document = run_primary(&adapters, config, ctx, store)
        .await
        .context("Failed to write snapshot")?;

    println!("arXiv:            {}", document.arxiv.len());
    println!("Semantic Scholar: {}", document.semantic_scholar.len());
    println!("HackerNews:       {}", document.hackernews.len());
    println!("Reddit:           {}", document.reddit.len());
    println!("\nTotal: {} items", document.total_items());
    Ok(())
}

async fn cmd_jobs(config: &RadarConfig, ctx: &RunContext, store: &SnapshotStore) -> Result<()> {
    tracing::info!(data_dir = %store.dir().display(), "Starting faculty jobs fetch");

    // Job pages are best effort: one attempt, browser User-Agent.
    let fetcher = ReqwestFetcher::browser().context("Failed to create HTTP client")?;
    let adapter = FacultyJobsAdapter::new(fetcher);

    let jobs = run_jobs(&adapter, config, ctx, store)
        .await
        .context("Failed to update snapshot")?;

    println!("Total: {} faculty jobs", jobs.len());
    for (region, count) in region_counts(&jobs) {
        println!("  {region}: {count}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_apply_without_flags() {
        let cli = Cli::try_parse_from(["radar", "jobs"]).unwrap();
        assert!(matches!(cli.command, Commands::Jobs));
        assert_eq!(cli.data_dir, PathBuf::from("docs/data"));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli =
            Cli::try_parse_from(["radar", "fetch", "--config", "cfg.md", "--s2-api-key", "k"])
                .unwrap();
        assert_eq!(cli.config, PathBuf::from("cfg.md"));
        assert_eq!(cli.s2_api_key.as_deref(), Some("k"));
    }
}
