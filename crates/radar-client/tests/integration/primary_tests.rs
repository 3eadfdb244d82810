use std::collections::HashSet;

use radar_client::pipeline::{collect_primary, run_jobs, run_primary};
use radar_client::FacultyJobsAdapter;
use radar_core::models::Source;
use radar_core::snapshot::SnapshotStore;
use radar_core::testutil::MockFetcher;

use crate::common::{config, ctx, fetcher, primary_adapters};

#[tokio::test]
async fn primary_run_fills_every_section() {
    let doc = collect_primary(&primary_adapters(fetcher()), &config(), &ctx()).await;

    let arxiv_ids: Vec<_> = doc.arxiv.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(arxiv_ids, ["2601.00001v1"]);
    assert_eq!(doc.semantic_scholar.len(), 1);
    assert_eq!(doc.semantic_scholar[0].extras.citations, Some(12));

    let hn_ids: Vec<_> = doc.hackernews.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(hn_ids, ["102", "101"]);

    assert_eq!(doc.reddit.len(), 1);
    assert_eq!(doc.reddit[0].matched_keyword, "agent");
    assert!(doc.faculty_jobs.is_none());

    assert_eq!(doc.blogs.len(), 1);
    assert_eq!(doc.meta.lookback_days, 7);
    assert_eq!(doc.meta.keywords, config().arxiv_keywords);
    assert_eq!(doc.total_items(), 5);
}

#[tokio::test]
async fn ids_are_distinct_and_dates_in_window() {
    let ctx = ctx();
    let doc = collect_primary(&primary_adapters(fetcher()), &config(), &ctx).await;

    for (source, window) in [
        (Source::Arxiv, 9),
        (Source::SemanticScholar, 28),
        (Source::Hackernews, 7),
        (Source::Reddit, 7),
    ] {
        let records = doc.records(source);
        let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), records.len(), "duplicate ids in {source}");
        assert!(
            records.iter().all(|r| ctx.is_recent_date(r.published, window)),
            "stale record in {source}"
        );
        assert!(records.iter().all(|r| r.source == source));
    }
}

#[tokio::test]
async fn unreachable_services_leave_sections_empty() {
    let doc = collect_primary(&primary_adapters(MockFetcher::new()), &config(), &ctx()).await;
    assert_eq!(doc.total_items(), 0);
    assert_eq!(doc.blogs.len(), 1);
}

#[tokio::test]
async fn snapshot_and_archive_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("data"));

    run_primary(&primary_adapters(fetcher()), &config(), &ctx(), &store)
        .await
        .unwrap();

    let snapshot = store.read().await.unwrap().unwrap();
    assert_eq!(snapshot["arxiv"][0]["id"], "2601.00001v1");
    assert_eq!(snapshot["arxiv"][0]["published"], "2026-01-08");
    assert_eq!(snapshot["meta"]["lookback_days"], 7);
    assert!(snapshot.get("faculty_jobs").is_none());

    let archive = std::fs::read_to_string(store.archive_path(ctx().today())).unwrap();
    let archive: serde_json::Value = serde_json::from_str(&archive).unwrap();
    assert_eq!(archive, snapshot);
}

#[tokio::test]
async fn runs_do_not_clobber_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let jobs = FacultyJobsAdapter::new(fetcher());

    run_jobs(&jobs, &config(), &ctx(), &store).await.unwrap();
    run_primary(&primary_adapters(fetcher()), &config(), &ctx(), &store)
        .await
        .unwrap();

    let snapshot = store.read().await.unwrap().unwrap();
    assert_eq!(snapshot["faculty_jobs"].as_array().unwrap().len(), 11);
    assert_eq!(snapshot["hackernews"].as_array().unwrap().len(), 2);

    run_jobs(&jobs, &config(), &ctx(), &store).await.unwrap();
    let snapshot = store.read().await.unwrap().unwrap();
    assert_eq!(snapshot["arxiv"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn archive_is_not_overwritten_on_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());

    run_primary(&primary_adapters(fetcher()), &config(), &ctx(), &store)
        .await
        .unwrap();
    run_primary(&primary_adapters(MockFetcher::new()), &config(), &ctx(), &store)
        .await
        .unwrap();

    let archive = std::fs::read_to_string(store.archive_path(ctx().today())).unwrap();
    let archive: serde_json::Value = serde_json::from_str(&archive).unwrap();
    assert_eq!(archive["arxiv"].as_array().unwrap().len(), 1);

    let snapshot = store.read().await.unwrap().unwrap();
    assert!(snapshot["arxiv"].as_array().unwrap().is_empty());
}
