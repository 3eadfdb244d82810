//! Deduplication and ordering rules applied when combining adapter output.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::models::{JobOrigin, NormalizedRecord};
use crate::text::truncate_chars;

const TITLE_KEY_LEN: usize = 60;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("static regex is valid"));

/// Normalized dedup key for a title: lowercased, non-word characters
/// stripped, first 60 characters.
pub fn title_key(title: &str) -> String {
    let stripped = NON_WORD.replace_all(&title.to_lowercase(), "").into_owned();
    truncate_chars(&stripped, TITLE_KEY_LEN)
}

/// Drop records whose title key was already seen. First occurrence wins
/// and relative order is kept.
pub fn dedup_by_title(records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(title_key(&r.title)))
        .collect()
}

/// Live listings first, curated boards last; newest `ts` first within
/// each group. The sort is stable.
pub fn order_job_listings(records: &mut [NormalizedRecord]) {
    records.sort_by_key(|r| {
        (
            r.extras.origin == Some(JobOrigin::Board),
            Reverse(r.extras.ts.unwrap_or(0)),
        )
    });
}

/// Stable sort by publication date, newest first.
pub fn sort_newest_first(records: &mut [NormalizedRecord]) {
    records.sort_by_key(|r| Reverse(r.published));
}

/// Overlay `updates` onto an existing snapshot object, key by key.
/// Sections not named in `updates` are carried over untouched. A
/// non-object snapshot is discarded.
pub fn merge_sections(existing: Option<Value>, updates: Map<String, Value>) -> Value {
    let mut merged = match existing {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for (key, value) in updates {
        merged.insert(key, value);
    }
    Value::Object(merged)
}
