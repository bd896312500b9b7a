//! Shared application state

use std::sync::Arc;

use crate::auth::rate_limit::RateLimiter;
use crate::auth::AdminDirectory;
use crate::store::{ArticleStore, CounterStore, SessionStore};
use crate::utils::Clock;

/// State shared by all request handlers.
///
/// The counter and session stores are the only mutable pieces; everything
/// else is read-only after startup.
pub struct AppState {
    pub counters: CounterStore,
    pub sessions: SessionStore,
    pub articles: ArticleStore,
    pub admins: AdminDirectory,
    pub login_limiter: RateLimiter,
    pub event_limiter: RateLimiter,
    pub clock: Arc<dyn Clock>,
    /// Exact origin allowed to send credentialed CORS requests.
    pub frontend_origin: Option<String>,
}

impl AppState {
    pub fn new(
        counters: CounterStore,
        sessions: SessionStore,
        articles: ArticleStore,
        admins: AdminDirectory,
        clock: Arc<dyn Clock>,
        frontend_origin: Option<String>,
    ) -> Self {
        Self {
            counters,
            sessions,
            articles,
            admins,
            login_limiter: RateLimiter::for_login(),
            event_limiter: RateLimiter::for_tracking(),
            clock,
            frontend_origin,
        }
    }
}
