use radar_client::pipeline::{collect_jobs, region_counts};
use radar_client::FacultyJobsAdapter;
use radar_core::models::JobOrigin;
use radar_core::region::Region;

use crate::common::{config, ctx, fetcher};

#[tokio::test]
async fn listings_are_deduplicated_and_boards_come_last() {
    let adapter = FacultyJobsAdapter::new(fetcher());
    let jobs = collect_jobs(&adapter, &config(), &ctx()).await;

    let origins: Vec<_> = jobs.iter().filter_map(|j| j.extras.origin).collect();
    assert_eq!(jobs.len(), 11);
    assert_eq!(
        &origins[..3],
        [JobOrigin::CsRankings, JobOrigin::CsRankings, JobOrigin::GithubWiki]
    );
    assert!(origins[3..].iter().all(|o| *o == JobOrigin::Board));

    assert_eq!(
        jobs[0].title,
        "University of Waterloo — Assistant position in HCI | Deadline: 2026-02-15"
    );
    assert_eq!(jobs[0].link, "https://drafty.cs.brown.edu/csopenpositions/p/1");
    assert_eq!(jobs[1].extras.region, Some(Region::Asia));
    assert_eq!(jobs[2].title, "NUS Singapore — Faculty Position");
    assert_eq!(jobs[2].matched_keyword, "🇸🇬 Singapore");
}

#[tokio::test]
async fn job_ids_are_unique_after_dedup() {
    let adapter = FacultyJobsAdapter::new(fetcher());
    let jobs = collect_jobs(&adapter, &config(), &ctx()).await;

    let mut ids: Vec<_> = jobs.iter().map(|j| j.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), jobs.len());
}

#[tokio::test]
async fn region_summary_counts_every_listing() {
    let adapter = FacultyJobsAdapter::new(fetcher());
    let jobs = collect_jobs(&adapter, &config(), &ctx()).await;

    let counts = region_counts(&jobs);
    assert_eq!(counts[0], (Region::Global, 4));
    assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), jobs.len());
}
