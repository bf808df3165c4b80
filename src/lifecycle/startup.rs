//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Refuse to start without a backend address
//! - Bind the listener and start optional metrics
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, GatewayConfig};
use crate::http::{HttpServer, ServerError};
use crate::observability::metrics::init_metrics;

/// Why the gateway could not start.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("API_URL is not configured")]
    MissingBackend,

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

/// Load configuration from `path` (or defaults) plus environment.
pub fn load(path: Option<&Path>) -> Result<GatewayConfig, StartupError> {
    Ok(load_config(path)?)
}

/// Build the server, requiring a backend address.
pub fn build_server(config: GatewayConfig) -> Result<HttpServer, StartupError> {
    if config.backend.api_url().is_none() {
        return Err(StartupError::MissingBackend);
    }
    Ok(HttpServer::new(config)?)
}

/// Start metrics (if enabled) and bind the listener.
pub async fn bind(config: &GatewayConfig) -> Result<TcpListener, StartupError> {
    if config.observability.metrics_enabled {
        // Validated at load time.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            init_metrics(addr);
        }
    }

    TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })
}
