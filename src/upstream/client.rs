//! HTTP client for the RAG backend.

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use std::time::Duration;
use url::Url;

use crate::config::{BackendConfig, TimeoutConfig};
use crate::http::X_REQUEST_ID;
use crate::resilience::timeouts::{with_deadline, Deadline, ForwardOutcome};

/// What the backend answered, before any interpretation.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: StatusCode,
    /// Value of the backend's correlation header, if it sent one.
    pub request_id: Option<HeaderValue>,
    /// Raw body, or why it could not be read in full once headers arrived.
    pub body: Result<Bytes, String>,
}

/// Client bound to one backend query endpoint.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    query_url: Url,
}

impl BackendClient {
    /// Build a client for `query_url`.
    pub fn new(
        query_url: Url,
        backend: &BackendConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, reqwest::Error> {
        let connect = timeouts.connect_ms.min(timeouts.forward_ms);
        let mut builder = reqwest::Client::builder().connect_timeout(Duration::from_millis(connect));
        if !backend.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;
        Ok(Self { http, query_url })
    }

    /// POST `body` to the backend and read the full response before `deadline`.
    ///
    /// Failing to get a status is a transport failure. Once the status is
    /// known, a broken body is carried in the reply instead.
    pub async fn forward(
        &self,
        body: &serde_json::Value,
        deadline: Deadline,
    ) -> ForwardOutcome<BackendReply> {
        let send = self.http.post(self.query_url.clone()).json(body).send();
        let sent = with_deadline(deadline, send).await;
        tracing::debug!(outcome = sent.label(), url = %self.query_url, "Backend request settled");
        let response = match sent {
            ForwardOutcome::Ok(response) => response,
            ForwardOutcome::TimedOut => return ForwardOutcome::TimedOut,
            ForwardOutcome::TransportFailed(detail) => return ForwardOutcome::TransportFailed(detail),
        };

        let status = response.status();
        let request_id = response.headers().get(X_REQUEST_ID).cloned();

        let body = match with_deadline(deadline, response.bytes()).await {
            ForwardOutcome::Ok(bytes) => Ok(bytes),
            ForwardOutcome::TimedOut => return ForwardOutcome::TimedOut,
            ForwardOutcome::TransportFailed(detail) => {
                tracing::debug!(status = status.as_u16(), error = %detail, "Backend body read failed");
                Err(detail)
            }
        };

        ForwardOutcome::Ok(BackendReply {
            status,
            request_id,
            body,
        })
    }
}
