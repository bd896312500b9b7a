//! Site Analytics Backend - Binary Entry Point
//!
//! This is the main entry point for the analytics-server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use site_analytics::api::http::create_router;
use site_analytics::api::state::AppState;
use site_analytics::auth::AdminDirectory;
use site_analytics::config::ServerConfig;
use site_analytics::store::{ArticleStore, CounterStore, SessionStore};
use site_analytics::utils::{Clock, SystemClock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ServerConfig::from_env();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let counters = CounterStore::open(config.metrics_path(), Arc::clone(&clock))?;
    let sessions = SessionStore::open(config.sessions_path(), Arc::clone(&clock))?;
    let articles = ArticleStore::load(&config.articles_file)?;
    let admins = AdminDirectory::from_env()?;

    let state = Arc::new(AppState::new(
        counters,
        sessions,
        articles,
        admins,
        clock,
        config.frontend_origin.clone(),
    ));

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!("{} v{} listening on {}", site_analytics::NAME, site_analytics::VERSION, config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to install shutdown handler: {}", e);
        return;
    }
    log::info!("shutting down");
}
