use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};

/// Per-run clock. Every recency decision in a run reads "now" from here,
/// so tests can pin it.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    now: DateTime<Utc>,
}

impl RunContext {
    /// Context anchored at the current wall-clock time.
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Context anchored at a fixed instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn year(&self) -> i32 {
        self.now.year()
    }

    /// Earliest instant inside a window of `days`. Windows reaching past
    /// the representable range start at the earliest representable instant.
    pub fn cutoff(&self, days: i64) -> DateTime<Utc> {
        TimeDelta::try_days(days)
            .and_then(|window| self.now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Earliest calendar date inside a window of `days`.
    pub fn cutoff_date(&self, days: i64) -> NaiveDate {
        self.cutoff(days).date_naive()
    }

    /// Inclusive on the cutoff date.
    pub fn is_recent_date(&self, date: NaiveDate, days: i64) -> bool {
        date >= self.cutoff_date(days)
    }

    pub fn is_recent_timestamp(&self, unix_secs: i64, days: i64) -> bool {
        unix_secs >= self.cutoff(days).timestamp()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
