//! Site Analytics Backend
//!
//! The content-management core of a corporate marketing site: a
//! session-guarded admin API and a daily analytics engine over durable
//! counter stores.
//!
//! # Features
//!
//! - **Tracking**: public view/click/share events classified into two
//!   independent daily counter tables (per-article, per-tag)
//! - **Atomic upserts**: increment-or-create under concurrent writers with
//!   no lost updates, durably logged
//! - **Reporting**: window totals, per-day time series with trend
//!   percentage, top-N rankings enriched with article metadata
//! - **Sessions**: opaque tokens stored only as digests, 24h expiry,
//!   idempotent revocation, per-address login throttling
//!
//! # Modules
//!
//! - `types`: Core data structures (metrics, sessions, articles)
//! - `store`: Append-only JSONL-backed stores (counters, sessions, articles)
//! - `analytics`: Event classifier and reporting engine
//! - `auth`: Admin directory, opaque tokens, rate limiting, access guard
//! - `api`: Axum HTTP surface
//! - `config`: Environment-based server configuration
//! - `utils`: Injected clock

pub mod analytics;
pub mod api;
pub mod auth;
pub mod config;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::http::create_router;
pub use api::state::AppState;
pub use auth::AdminDirectory;
pub use config::ServerConfig;
pub use store::{ArticleStore, CounterStore, SessionStore};
pub use types::{Article, ArticleStatus, Metric, MetricUpdate, Period, Session};
pub use utils::{Clock, ManualClock, SystemClock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
