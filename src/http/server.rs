//! HTTP server setup and the query gateway handler.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing)
//! - Bind server to listener with graceful shutdown
//! - Forward queries to the backend under the deadline budget
//! - Classify every outcome into a fixed status/body pair

use axum::{
    body::Body,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{resolve_query_url, GatewayConfig, ValidationError};
use crate::http::request::{decode_json_body, strip_bom};
use crate::http::response::{GatewayError, Relay};
use crate::observability::metrics;
use crate::resilience::timeouts::{Deadline, ForwardOutcome};
use crate::upstream::BackendClient;

/// Path the gateway accepts queries on.
pub const QUERY_PATH: &str = "/api/run";

/// Error building the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid backend configuration: {0}")]
    Backend(#[from] ValidationError),

    #[error("failed to build backend client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no backend address is configured.
    pub backend: Option<Arc<BackendClient>>,
    pub forward_budget: Duration,
    pub max_body_size: usize,
}

impl AppState {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ServerError> {
        let backend = match resolve_query_url(&config.backend)? {
            Some(url) => Some(Arc::new(BackendClient::new(url, &config.backend, &config.timeouts)?)),
            None => None,
        };

        Ok(Self {
            backend,
            forward_budget: Duration::from_millis(config.timeouts.forward_ms),
            max_body_size: config.security.max_body_size,
        })
    }
}

/// HTTP server for the query gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// A missing backend address is accepted here; every query is then
    /// answered with `500`. Use `lifecycle::startup` to refuse it up front.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let state = AppState::from_config(&config)?;
        let router = build_router(state);
        Ok(Self { router, config })
    }

    /// Run the server until `shutdown` fires (or its coordinator is dropped).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend_configured = self.config.backend.api_url().is_some(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(QUERY_PATH, post(query_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Query gateway handler: validate, forward, classify, respond.
async fn query_handler(State(state): State<AppState>, body: Body) -> Response {
    let start_time = Instant::now();

    match mediate(&state, body).await {
        Ok(relay) => {
            let status = relay.status.as_u16();
            tracing::info!(
                status,
                request_id = relay.request_id.as_ref().and_then(|v| v.to_str().ok()).unwrap_or("-"),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Relayed backend response"
            );
            metrics::record_request("relayed", status, start_time);
            relay.into_response()
        }
        Err(e) => {
            let status = e.status().as_u16();
            match &e {
                GatewayError::InvalidBody => {
                    tracing::debug!(status, outcome = e.kind(), "Rejected request")
                }
                GatewayError::Unavailable(detail) => {
                    tracing::warn!(status, outcome = e.kind(), error = %detail, "Backend call failed")
                }
                _ => tracing::warn!(status, outcome = e.kind(), "Gateway error"),
            }
            metrics::record_request(e.kind(), status, start_time);
            e.into_response()
        }
    }
}

/// The gateway steps in order. Nothing here touches the network before the
/// configuration and the inbound body have both been accepted.
async fn mediate(state: &AppState, body: Body) -> Result<Relay, GatewayError> {
    let backend = state.backend.as_ref().ok_or(GatewayError::NotConfigured)?;

    let payload = decode_json_body(body, state.max_body_size).await?;

    let deadline = Deadline::after(state.forward_budget);
    let reply = match backend.forward(&payload, deadline).await {
        ForwardOutcome::Ok(reply) => reply,
        ForwardOutcome::TimedOut => return Err(GatewayError::Timeout),
        ForwardOutcome::TransportFailed(detail) => return Err(GatewayError::Unavailable(detail)),
    };

    let raw = reply.body.as_ref().map_err(|_| GatewayError::InvalidBackendResponse)?;
    let body = serde_json::from_slice(strip_bom(raw)).map_err(|e| {
        tracing::debug!(backend_status = reply.status.as_u16(), error = %e, "Backend body is not JSON");
        GatewayError::InvalidBackendResponse
    })?;

    Ok(Relay {
        status: reply.status,
        request_id: reply.request_id,
        body,
    })
}
