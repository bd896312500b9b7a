//! Durable stores
//!
//! Each mutable store owns an append-only JSONL log and an in-memory state
//! rebuilt by replaying the log at startup:
//!
//! ```text
//! Write path:
//! ┌─────────┐    ┌──────────────┐    ┌──────────────────┐
//! │ Request │───►│ take write   │───►│ append + fsync,  │
//! │ handler │    │ lock         │    │ then apply       │
//! └─────────┘    └──────────────┘    └──────────────────┘
//!
//! Read path (startup):
//! ┌──────────────┐    ┌─────────────────┐
//! │ Load records │───►│ Replay in order │───► Ready!
//! └──────────────┘    └─────────────────┘
//! ```
//!
//! Holding the write lock across append+apply makes increment-or-create
//! atomic with respect to concurrent callers; appending before applying
//! means a failed append leaves the in-memory state untouched.
//!
//! - `counters`: daily content/tag counter tables (sole writer of
//!   `metrics.jsonl`)
//! - `sessions`: admin sessions keyed by token digest (sole writer of
//!   `sessions.jsonl`)
//! - `articles`: read-only article catalog loaded once at startup

mod articles;
mod counters;
mod event_log;
mod sessions;

pub use articles::ArticleStore;
pub use counters::CounterStore;
pub use event_log::EventLog;
pub use sessions::SessionStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}
