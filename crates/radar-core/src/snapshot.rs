//! Snapshot and archive files.
//!
//! ```text
//! data_dir/
//! ├── latest.json              # canonical snapshot, updated every run
//! └── archive-2025-05-06.json  # dated copy, written once per day
//! ```
//!
//! Writers update only the sections they own: the snapshot is read back,
//! the new sections are overlaid, and the result is rewritten. Two runs
//! racing on the same directory can still lose an update.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::AppError;
use crate::merge::merge_sections;

pub const SNAPSHOT_FILE: &str = "latest.json";

/// File-backed store for the snapshot and its archives.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    pub fn archive_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("archive-{}.json", date.format("%Y-%m-%d")))
    }

    /// Create the data directory if needed.
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Current snapshot, or `None` when there is none yet. A snapshot that
    /// fails to parse is treated as absent.
    pub async fn read(&self) -> Result<Option<Value>, AppError> {
        let path = self.snapshot_path();
        let text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable snapshot");
                Ok(None)
            }
        }
    }

    /// Overlay the top-level fields of `document` onto the snapshot and
    /// rewrite it. Returns the merged document. Documents that do not
    /// serialize to a JSON object contribute no sections.
    pub async fn update<T: Serialize>(&self, document: &T) -> Result<Value, AppError> {
        let updates = match serde_json::to_value(document)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.update_sections(updates).await
    }

    /// Replace the given sections and rewrite the snapshot.
    pub async fn update_sections(&self, updates: Map<String, Value>) -> Result<Value, AppError> {
        self.ensure_dir().await?;
        let merged = merge_sections(self.read().await?, updates);
        let path = self.snapshot_path();
        fs::write(&path, to_pretty_json(&merged)?).await?;
        tracing::info!(path = %path.display(), "Wrote snapshot");
        Ok(merged)
    }

    /// Write the dated archive. An archive already present for `date` is
    /// left as is; returns whether a new file was written.
    pub async fn write_archive(&self, date: NaiveDate, document: &Value) -> Result<bool, AppError> {
        self.ensure_dir().await?;
        let path = self.archive_path(date);
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                tracing::info!(path = %path.display(), "Archive already exists, keeping it");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(to_pretty_json(document)?.as_bytes()).await?;
        file.flush().await?;
        tracing::info!(path = %path.display(), "Wrote archive");
        Ok(true)
    }
}

/// Two-space indented JSON; non-ASCII characters are written verbatim.
fn to_pretty_json(value: &Value) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()
    }

    #[tokio::test]
    async fn read_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_preserves_other_sections() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data"));

        store
            .update(&json!({"arxiv": [{"id": "1"}], "meta": {"lookback_days": 7}}))
            .await
            .unwrap();
        let mut jobs = Map::new();
        jobs.insert("faculty_jobs".into(), json!([{"title": "Job"}]));
        let merged = store.update_sections(jobs).await.unwrap();

        assert_eq!(merged["arxiv"][0]["id"], "1");
        assert_eq!(merged["faculty_jobs"][0]["title"], "Job");
        assert_eq!(store.read().await.unwrap().unwrap(), merged);
    }

    #[tokio::test]
    async fn snapshot_keeps_non_ascii_and_indents() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        store.update(&json!({"region": "🇨🇦 Canada"})).await.unwrap();

        let text = std::fs::read_to_string(store.snapshot_path()).unwrap();
        assert!(text.contains("🇨🇦 Canada"));
        assert!(text.contains("\n  \"region\""));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        std::fs::write(store.snapshot_path(), "{not json").unwrap();

        let merged = store.update(&json!({"reddit": []})).await.unwrap();
        assert_eq!(merged, json!({"reddit": []}));
    }

    #[tokio::test]
    async fn archive_is_written_once_per_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        assert!(store.write_archive(date(), &json!({"v": 1})).await.unwrap());
        assert!(!store.write_archive(date(), &json!({"v": 2})).await.unwrap());

        let text = std::fs::read_to_string(store.archive_path(date())).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["v"], 1);
        assert!(
            store
                .archive_path(date())
                .ends_with("archive-2025-05-06.json")
        );
    }
}
