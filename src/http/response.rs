//! Outbound response construction.
//!
//! # Responsibilities
//! - Map every gateway failure to a fixed status and `{"error": ...}` body
//! - Relay structurally valid backend answers unchanged
//! - Copy the backend's correlation header, never invent one
//!
//! # Design Decisions
//! - Backend status is only trusted once its body decoded as JSON
//! - The relayed body is re-serialized from the decoded value, so the
//!   content type is always `application/json`

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::request::X_REQUEST_ID;

/// Every way the gateway itself can answer instead of the backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No backend base address is configured.
    #[error("API_URL is not configured")]
    NotConfigured,

    /// Inbound body unreadable or not JSON.
    #[error("Invalid request body")]
    InvalidBody,

    /// Forwarding deadline passed.
    #[error("Backend timeout")]
    Timeout,

    /// Any other transport-level failure; the detail is only logged.
    #[error("Backend unavailable")]
    Unavailable(String),

    /// The backend answered with a body that is not JSON.
    #[error("Invalid response from backend")]
    InvalidBackendResponse,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::InvalidBody => StatusCode::BAD_REQUEST,
            GatewayError::Timeout | GatewayError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::InvalidBackendResponse => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::NotConfigured => "not_configured",
            GatewayError::InvalidBody => "invalid_body",
            GatewayError::Timeout => "timeout",
            GatewayError::Unavailable(_) => "unavailable",
            GatewayError::InvalidBackendResponse => "invalid_backend_response",
        }
    }
}

/// JSON error body shared by the gateway and its clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// A backend answer that passed structural validation.
#[derive(Debug, Clone)]
pub struct Relay {
    pub status: StatusCode,
    pub request_id: Option<HeaderValue>,
    pub body: serde_json::Value,
}

impl IntoResponse for Relay {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        if let Some(request_id) = self.request_id {
            response.headers_mut().insert(X_REQUEST_ID, request_id);
        }
        response
    }
}
