//! Daily counter types
//!
//! Content metrics (per-article views/shares) and tag metrics (per-tag
//! clicks) are two distinct key spaces sharing no schema. The classifier
//! output is a sum type so the two families never blur into one table with
//! nullable columns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which counter family and key an accepted tracking event routes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricUpdate {
    /// +1 view on an article's daily content row
    View {
        #[serde(rename = "articleId")]
        article_id: Uuid,
    },
    /// +1 share on an article's daily content row
    Share {
        #[serde(rename = "articleId")]
        article_id: Uuid,
    },
    /// +1 click on a UI tag's daily row
    Click { tag: String },
}

/// One line in the metrics log: an accepted update stamped with the UTC day
/// it was counted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub day: NaiveDate,
    #[serde(flatten)]
    pub update: MetricUpdate,
}

/// Per-day view/share counters for one article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentCounters {
    pub views: u64,
    pub shares: u64,
}

/// Reporting lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Parse a `period` query value; anything outside the three named
    /// buckets falls back to the 30-day window.
    pub fn parse(value: &str) -> Self {
        match value {
            "7d" => Period::Week,
            "1y" => Period::Year,
            _ => Period::Month,
        }
    }

    /// Lookback in days.
    pub fn days(&self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 365,
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Month
    }
}

/// Reporting metric selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Views,
    Shares,
    Clicks,
}

impl Metric {
    /// Parse a `metric` query value; anything outside the valid set falls
    /// back to views.
    pub fn parse(value: &str) -> Self {
        match value {
            "shares" => Metric::Shares,
            "clicks" => Metric::Clicks,
            _ => Metric::Views,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Views => "views",
            Metric::Shares => "shares",
            Metric::Clicks => "clicks",
        }
    }
}
