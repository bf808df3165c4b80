//! Transport from the result display to the gateway.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::client::types::{Query, QueryRequest};
use crate::http::QUERY_PATH;

/// A settled gateway call: any status, raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The call did not settle with a status.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Human-readable failure text, if there is any.
    pub fn message(&self) -> Option<String> {
        let message = self.to_string();
        let trimmed = message.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Sends one query to the gateway.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    async fn post_query(&self, query: &Query) -> Result<GatewayReply, TransportError>;
}

/// `reqwest`-backed transport against a running gateway.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Transport for the gateway at `base_url` (e.g. "http://localhost:3000").
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let joined = format!("{}{}", base_url.trim_end_matches('/'), QUERY_PATH);
        let endpoint = Url::parse(&joined)
            .map_err(|e| TransportError::Other(format!("invalid gateway URL `{}`: {}", base_url, e)))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    /// Use a preconfigured client (timeouts, proxy settings).
    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GatewayTransport for HttpTransport {
    async fn post_query(&self, query: &Query) -> Result<GatewayReply, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&QueryRequest { query })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(GatewayReply { status, body })
    }
}
