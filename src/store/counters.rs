//! Counter store
//!
//! Durable daily counters behind an atomic increment-or-create operation.
//! Two independent key spaces: per-article content counters (views/shares)
//! and per-tag click counters. Rows are created on first increment and only
//! ever grow; nothing here deletes.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::types::{ContentCounters, Metric, MetricRecord, MetricUpdate};
use crate::utils::Clock;

use super::{EventLog, StoreResult};

#[derive(Default)]
struct CounterState {
    content: HashMap<(NaiveDate, Uuid), ContentCounters>,
    tags: HashMap<(NaiveDate, String), u64>,
}

impl CounterState {
    fn apply(&mut self, record: &MetricRecord) {
        match &record.update {
            MetricUpdate::View { article_id } => {
                self.content
                    .entry((record.day, *article_id))
                    .or_default()
                    .views += 1;
            }
            MetricUpdate::Share { article_id } => {
                self.content
                    .entry((record.day, *article_id))
                    .or_default()
                    .shares += 1;
            }
            MetricUpdate::Click { tag } => {
                *self.tags.entry((record.day, tag.clone())).or_default() += 1;
            }
        }
    }
}

/// Daily counter tables with increment-or-create writes.
///
/// Sole writer of `metrics.jsonl`; the reporting engine only reads.
pub struct CounterStore {
    log: EventLog,
    clock: Arc<dyn Clock>,
    state: RwLock<CounterState>,
}

impl CounterStore {
    /// Open the store, replaying the metrics log to rebuild the counters.
    pub fn open<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let log = EventLog::new(path);
        let records: Vec<MetricRecord> = log.load()?;

        let mut state = CounterState::default();
        for record in &records {
            state.apply(record);
        }

        log::info!(
            "counter store ready: replayed {} records ({} content rows, {} tag rows)",
            records.len(),
            state.content.len(),
            state.tags.len()
        );

        Ok(Self {
            log,
            clock,
            state: RwLock::new(state),
        })
    }

    /// Increment-or-create the counter row for `update` by exactly 1.
    ///
    /// The day is derived from the injected clock at the instant of the
    /// call (UTC calendar date) — there is no backdating. The write lock is
    /// held across append+apply, so concurrent increments on the same key
    /// never lose updates; a failed append changes nothing.
    pub fn record(&self, update: MetricUpdate) -> StoreResult<()> {
        let record = MetricRecord {
            day: self.clock.today(),
            update,
        };

        let mut state = self.state.write();
        self.log.append(&record)?;
        state.apply(&record);
        Ok(())
    }

    /// Sum of views and shares across all articles for days >= `since`.
    pub fn content_totals(&self, since: NaiveDate) -> ContentCounters {
        let state = self.state.read();
        let mut totals = ContentCounters::default();
        for ((day, _), counters) in &state.content {
            if *day >= since {
                totals.views += counters.views;
                totals.shares += counters.shares;
            }
        }
        totals
    }

    /// Sum of clicks across all tags for days >= `since`.
    pub fn click_total(&self, since: NaiveDate) -> u64 {
        let state = self.state.read();
        state
            .tags
            .iter()
            .filter(|((day, _), _)| *day >= since)
            .map(|(_, clicks)| clicks)
            .sum()
    }

    /// Per-day aggregate of `metric` for days >= `since`, ascending by day.
    /// Days with no rows are simply absent.
    pub fn series(&self, since: NaiveDate, metric: Metric) -> BTreeMap<NaiveDate, u64> {
        let state = self.state.read();
        let mut series: BTreeMap<NaiveDate, u64> = BTreeMap::new();

        match metric {
            Metric::Views | Metric::Shares => {
                for ((day, _), counters) in &state.content {
                    if *day >= since {
                        let value = match metric {
                            Metric::Views => counters.views,
                            _ => counters.shares,
                        };
                        *series.entry(*day).or_default() += value;
                    }
                }
            }
            Metric::Clicks => {
                for ((day, _), clicks) in &state.tags {
                    if *day >= since {
                        *series.entry(*day).or_default() += clicks;
                    }
                }
            }
        }

        // A content row touched only by the other counter that day (e.g.
        // shares but no views) would surface as a zero point; days with no
        // data are absent, not zero-filled.
        series.retain(|_, value| *value > 0);
        series
    }

    /// Per-article sum of `metric` (views or shares) for days >= `since`.
    pub fn totals_by_article(&self, since: NaiveDate, metric: Metric) -> HashMap<Uuid, u64> {
        let state = self.state.read();
        let mut totals: HashMap<Uuid, u64> = HashMap::new();
        for ((day, article_id), counters) in &state.content {
            if *day >= since {
                let value = match metric {
                    Metric::Shares => counters.shares,
                    _ => counters.views,
                };
                *totals.entry(*article_id).or_default() += value;
            }
        }
        totals
    }

    /// Per-tag sum of clicks for days >= `since`.
    pub fn totals_by_tag(&self, since: NaiveDate) -> HashMap<String, u64> {
        let state = self.state.read();
        let mut totals: HashMap<String, u64> = HashMap::new();
        for ((day, tag), clicks) in &state.tags {
            if *day >= since {
                *totals.entry(tag.clone()).or_default() += clicks;
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ManualClock;
    use chrono::{TimeZone, Utc};
    use std::thread;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir, clock: Arc<ManualClock>) -> CounterStore {
        CounterStore::open(dir.path().join("metrics.jsonl"), clock).unwrap()
    }

    fn test_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap(),
        ))
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_increment_creates_then_increments() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, test_clock());
        let id = Uuid::new_v4();

        store.record(MetricUpdate::View { article_id: id }).unwrap();
        store.record(MetricUpdate::View { article_id: id }).unwrap();
        store.record(MetricUpdate::Share { article_id: id }).unwrap();

        let totals = store.content_totals(day(2024, 6, 1));
        assert_eq!(totals.views, 2);
        assert_eq!(totals.shares, 1);
    }

    #[test]
    fn test_tag_clicks_are_independent_of_content() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, test_clock());

        store
            .record(MetricUpdate::Click {
                tag: "navbar-contact".to_string(),
            })
            .unwrap();
        store
            .record(MetricUpdate::Click {
                tag: "navbar-contact".to_string(),
            })
            .unwrap();

        assert_eq!(store.click_total(day(2024, 6, 1)), 2);
        let totals = store.content_totals(day(2024, 6, 1));
        assert_eq!(totals.views, 0);
        assert_eq!(totals.shares, 0);
    }

    #[test]
    fn test_concurrent_increments_lose_no_updates() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(open_store(&dir, test_clock()));
        let id = Uuid::new_v4();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..16 {
                        store.record(MetricUpdate::View { article_id: id }).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let totals = store.content_totals(day(2024, 6, 1));
        assert_eq!(totals.views, 8 * 16);
    }

    #[test]
    fn test_replay_rebuilds_counters() {
        let dir = TempDir::new().unwrap();
        let clock = test_clock();
        let id = Uuid::new_v4();

        {
            let store = open_store(&dir, Arc::clone(&clock));
            store.record(MetricUpdate::View { article_id: id }).unwrap();
            store.record(MetricUpdate::Share { article_id: id }).unwrap();
            store
                .record(MetricUpdate::Click {
                    tag: "footer-cta".to_string(),
                })
                .unwrap();
        }

        let reopened = open_store(&dir, clock);
        let totals = reopened.content_totals(day(2024, 6, 1));
        assert_eq!(totals.views, 1);
        assert_eq!(totals.shares, 1);
        assert_eq!(reopened.click_total(day(2024, 6, 1)), 1);
    }

    #[test]
    fn test_day_comes_from_clock() {
        let dir = TempDir::new().unwrap();
        let clock = test_clock();
        let store = open_store(&dir, Arc::clone(&clock));
        let id = Uuid::new_v4();

        store.record(MetricUpdate::View { article_id: id }).unwrap();
        clock.advance_days(1);
        store.record(MetricUpdate::View { article_id: id }).unwrap();

        let series = store.series(day(2024, 6, 1), Metric::Views);
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(&day(2024, 6, 10)), Some(&1));
        assert_eq!(series.get(&day(2024, 6, 11)), Some(&1));
    }

    #[test]
    fn test_window_excludes_older_days() {
        let dir = TempDir::new().unwrap();
        let clock = test_clock();
        let store = open_store(&dir, Arc::clone(&clock));
        let id = Uuid::new_v4();

        store.record(MetricUpdate::View { article_id: id }).unwrap();
        clock.advance_days(10);
        store.record(MetricUpdate::View { article_id: id }).unwrap();

        // Window starting after the first record only sees the second.
        let totals = store.content_totals(day(2024, 6, 15));
        assert_eq!(totals.views, 1);

        let by_article = store.totals_by_article(day(2024, 6, 1), Metric::Views);
        assert_eq!(by_article.get(&id), Some(&2));
    }

    #[test]
    fn test_totals_by_tag() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, test_clock());

        for _ in 0..3 {
            store
                .record(MetricUpdate::Click {
                    tag: "hero-banner".to_string(),
                })
                .unwrap();
        }
        store
            .record(MetricUpdate::Click {
                tag: "footer-cta".to_string(),
            })
            .unwrap();

        let by_tag = store.totals_by_tag(day(2024, 6, 1));
        assert_eq!(by_tag.get("hero-banner"), Some(&3));
        assert_eq!(by_tag.get("footer-cta"), Some(&1));
    }
}
