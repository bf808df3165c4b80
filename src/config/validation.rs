//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (budgets > 0, addresses parse)
//! - Resolve the backend query URL once, at startup
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - A missing `api_url` is not a validation error here; the server decides
//!   whether that is fatal (see `lifecycle::startup`)

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::{BackendConfig, GatewayConfig};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("timeouts.forward_ms cannot be 0")]
    ZeroForwardBudget,

    #[error("backend.api_url `{0}` is not an absolute http(s) URL")]
    ApiUrl(String),

    #[error("backend.query_path `{0}` must start with '/'")]
    QueryPath(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.forward_ms == 0 {
        errors.push(ValidationError::ZeroForwardBudget);
    }

    if let Err(e) = resolve_query_url(&config.backend) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Build the absolute query endpoint URL from the backend section.
///
/// `Ok(None)` means no backend address is configured.
pub fn resolve_query_url(backend: &BackendConfig) -> Result<Option<Url>, ValidationError> {
    if !backend.query_path.starts_with('/') {
        return Err(ValidationError::QueryPath(backend.query_path.clone()));
    }

    let Some(base) = backend.api_url() else {
        return Ok(None);
    };

    // Plain concatenation keeps any path prefix on the base address.
    let joined = format!("{}{}", base.trim_end_matches('/'), backend.query_path);
    match Url::parse(&joined) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(Some(url)),
        _ => Err(ValidationError::ApiUrl(base.to_string())),
    }
}
