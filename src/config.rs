//! Server configuration
//!
//! Every knob is an environment variable read once at startup:
//!
//! - `ANALYTICS_PORT`: listen port (default 3000)
//! - `ANALYTICS_DATA_DIR`: directory for the metrics and session logs
//!   (default `data`)
//! - `ANALYTICS_ARTICLES_FILE`: article catalog JSONL (default
//!   `<data_dir>/articles.jsonl`)
//! - `ANALYTICS_FRONTEND_ORIGIN`: exact origin allowed to send credentialed
//!   CORS requests; unset means a permissive dev CORS policy
//! - `ANALYTICS_ADMINS`: admin provisioning, see `auth`

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Configuration for the analytics server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub articles_file: PathBuf,
    pub frontend_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            articles_file: data_dir.join("articles.jsonl"),
            data_dir,
            frontend_origin: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("ANALYTICS_PORT") {
            match port.parse::<u16>() {
                Ok(port) => config.bind_addr.set_port(port),
                Err(_) => log::warn!("ignoring unparsable ANALYTICS_PORT={}", port),
            }
        }

        if let Ok(dir) = std::env::var("ANALYTICS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
            config.articles_file = config.data_dir.join("articles.jsonl");
        }

        if let Ok(file) = std::env::var("ANALYTICS_ARTICLES_FILE") {
            config.articles_file = PathBuf::from(file);
        }

        config.frontend_origin = std::env::var("ANALYTICS_FRONTEND_ORIGIN").ok();

        config
    }

    /// Create config with custom data directory
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            articles_file: data_dir.join("articles.jsonl"),
            data_dir,
            ..Default::default()
        }
    }

    /// Get path to metrics.jsonl
    pub fn metrics_path(&self) -> PathBuf {
        self.data_dir.join("metrics.jsonl")
    }

    /// Get path to sessions.jsonl
    pub fn sessions_path(&self) -> PathBuf {
        self.data_dir.join("sessions.jsonl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ServerConfig::with_data_dir("/tmp/analytics");
        assert_eq!(config.metrics_path(), PathBuf::from("/tmp/analytics/metrics.jsonl"));
        assert_eq!(config.sessions_path(), PathBuf::from("/tmp/analytics/sessions.jsonl"));
        assert_eq!(
            config.articles_file,
            PathBuf::from("/tmp/analytics/articles.jsonl")
        );
    }
}
