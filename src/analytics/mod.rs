//! Analytics engine
//!
//! - `classify`: routes inbound tracking events to a counter family, or
//!   rejects them before anything is written
//! - `report`: read-only aggregation over the counter store (overview,
//!   timeseries with trend, rankings)

pub mod classify;
pub mod report;

pub use classify::{classify, ClassifyError, EventKind, TrackEvent};
pub use report::{
    overview, ranking, timeseries, OverviewReport, RankingEntry, RankingReport, SeriesPoint,
    TimeseriesReport, DEFAULT_RANKING_LIMIT, MAX_RANKING_LIMIT,
};
