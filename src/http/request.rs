//! Inbound request handling.
//!
//! # Responsibilities
//! - Read the inbound body under the configured size limit
//! - Decode it as JSON (any JSON value; shape is the backend's concern)
//! - Name the correlation header shared with the backend
//! - Tolerate a leading UTF-8 byte order mark on JSON bodies
//!
//! # Design Decisions
//! - Oversized and unreadable bodies are reported exactly like malformed
//!   JSON, so the caller only ever sees the fixed error set

use axum::body::Body;
use axum::http::HeaderName;

use crate::http::response::GatewayError;

/// Correlation header copied from backend responses.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Drop a leading UTF-8 byte order mark, which `serde_json` rejects.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Read and decode an inbound JSON body.
pub async fn decode_json_body(body: Body, limit: usize) -> Result<serde_json::Value, GatewayError> {
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to read request body");
        GatewayError::InvalidBody
    })?;

    serde_json::from_slice(strip_bom(&bytes)).map_err(|e| {
        tracing::debug!(error = %e, "Request body is not JSON");
        GatewayError::InvalidBody
    })
}
