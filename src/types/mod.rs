//! Data types for the site analytics backend
//!
//! This module contains the core data structures used throughout the
//! application.

mod article;
mod metric;
mod session;

pub use article::{Article, ArticleStatus};
pub use metric::{ContentCounters, Metric, MetricRecord, MetricUpdate, Period};
pub use session::Session;
