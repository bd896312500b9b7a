//! Reporting engine
//!
//! Read-only aggregation over the counter store: overview totals, per-day
//! time series with a trend percentage, and top-N rankings enriched with
//! article metadata. All lookback windows are `[today - N days, today]`
//! against the injected UTC calendar day.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::store::{ArticleStore, CounterStore};
use crate::types::{Metric, Period};

/// Rankings never return more than this many rows.
pub const MAX_RANKING_LIMIT: usize = 50;
/// Rows returned when the caller does not ask for a specific limit.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

#[derive(Debug, Serialize)]
pub struct OverviewTotals {
    pub views: u64,
    pub shares: u64,
    pub clicks: u64,
}

#[derive(Debug, Serialize)]
pub struct OverviewReport {
    pub totals: OverviewTotals,
    /// Window length in days, echoed back to the caller.
    pub period: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: u64,
}

#[derive(Debug, Serialize)]
pub struct TimeseriesReport {
    pub data: Vec<SeriesPoint>,
    /// First-vs-last change over the window, one decimal place. Omitted
    /// when the series is empty.
    #[serde(rename = "changePercentage", skip_serializing_if = "Option::is_none")]
    pub change_percentage: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RankingEntry {
    #[serde(rename = "articleId", skip_serializing_if = "Option::is_none")]
    pub article_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "publishedAt", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct RankingReport {
    pub data: Vec<RankingEntry>,
    pub metric: Metric,
    pub period: i64,
}

fn window_start(period: Period, today: NaiveDate) -> NaiveDate {
    today - Duration::days(period.days())
}

/// Sum of views, shares and clicks across all keys in the window. Missing
/// data sums to 0, never null.
pub fn overview(counters: &CounterStore, period: Period, today: NaiveDate) -> OverviewReport {
    let since = window_start(period, today);
    let content = counters.content_totals(since);
    let clicks = counters.click_total(since);

    OverviewReport {
        totals: OverviewTotals {
            views: content.views,
            shares: content.shares,
            clicks,
        },
        period: period.days(),
    }
}

/// One aggregate value per day with data in the window, ascending by day,
/// plus the first-vs-last trend percentage.
pub fn timeseries(
    counters: &CounterStore,
    period: Period,
    metric: Metric,
    today: NaiveDate,
) -> TimeseriesReport {
    let since = window_start(period, today);
    let data: Vec<SeriesPoint> = counters
        .series(since, metric)
        .into_iter()
        .map(|(date, value)| SeriesPoint { date, value })
        .collect();

    let change_percentage = trend_percentage(&data);
    TimeseriesReport {
        data,
        change_percentage,
    }
}

/// Trend between the earliest and latest points of a series.
///
/// A series starting at 0 and ending above it reports a symbolic 100% —
/// a "started from nothing" signal, not a true ratio. An empty series has
/// no trend.
fn trend_percentage(data: &[SeriesPoint]) -> Option<f64> {
    let first = data.first()?.value as f64;
    let last = data.last()?.value as f64;

    let pct = if first > 0.0 {
        (last - first) / first * 100.0
    } else if last > 0.0 {
        100.0
    } else {
        0.0
    };

    Some((pct * 10.0).round() / 10.0)
}

/// Top-N keys by summed metric in the window, descending.
///
/// Ties break by ascending article id (or tag), so the order is stable
/// across restarts. Content rankings are enriched with article metadata;
/// an article missing from the catalog keeps its row with empty metadata.
pub fn ranking(
    counters: &CounterStore,
    articles: &ArticleStore,
    period: Period,
    metric: Metric,
    limit: Option<usize>,
    today: NaiveDate,
) -> RankingReport {
    let since = window_start(period, today);
    let limit = limit.unwrap_or(DEFAULT_RANKING_LIMIT).min(MAX_RANKING_LIMIT);

    let data = match metric {
        Metric::Clicks => {
            let mut rows: Vec<(String, u64)> = counters.totals_by_tag(since).into_iter().collect();
            rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            rows.truncate(limit);

            rows.into_iter()
                .map(|(tag, total)| RankingEntry {
                    article_id: None,
                    tag: Some(tag),
                    slug: None,
                    title: None,
                    published_at: None,
                    total,
                })
                .collect()
        }
        Metric::Views | Metric::Shares => {
            let mut rows: Vec<(Uuid, u64)> =
                counters.totals_by_article(since, metric).into_iter().collect();
            rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            rows.truncate(limit);

            rows.into_iter()
                .map(|(article_id, total)| {
                    let article = articles.get(article_id);
                    RankingEntry {
                        article_id: Some(article_id),
                        tag: None,
                        slug: article.map(|a| a.slug.clone()),
                        title: article.map(|a| a.title.clone()),
                        published_at: article.and_then(|a| a.published_at),
                        total,
                    }
                })
                .collect()
        }
    };

    RankingReport {
        data,
        metric,
        period: period.days(),
    }
}
