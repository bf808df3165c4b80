//! The result state machine.
//!
//! # State Transitions
//! ```text
//! Idle | Success | Error → Loading: non-blank submission
//! Loading → Success: 2xx reply with a result body
//! Loading → Error: any other reply, or the call failing outright
//! ```
//!
//! # Design Decisions
//! - `submit` takes `&mut self`, so overlapping submissions cannot exist
//! - Every transition is published on a watch channel for renderers
//! - Nothing from a previous result survives into `Loading`

use tokio::sync::watch;

use crate::client::state::RequestState;
use crate::client::transport::{GatewayReply, GatewayTransport, TransportError};
use crate::client::types::{ExperimentResult, Query};
use crate::http::{strip_bom, ErrorBody};

/// Shown when a failed call carries no usable text.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Drives one `RequestState` through submissions.
pub struct ResultStateMachine<T> {
    transport: T,
    state: watch::Sender<RequestState>,
}

impl<T: GatewayTransport> ResultStateMachine<T> {
    /// Start in `Idle`.
    pub fn new(transport: T) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self { transport, state }
    }

    /// Observe every state change.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Submit `raw`. Blank input is ignored and returns `false`; otherwise
    /// exactly one gateway call is made and the state ends in `Success` or
    /// `Error`.
    pub async fn submit(&mut self, raw: &str) -> bool {
        let Some(query) = Query::parse(raw) else {
            tracing::debug!("Ignoring blank submission");
            return false;
        };

        self.state.send_replace(RequestState::Loading);
        tracing::debug!(query = %query, "Submitting query");

        let next = match self.transport.post_query(&query).await {
            Ok(reply) => resolve_reply(&reply),
            Err(e) => resolve_transport_error(&e),
        };

        tracing::debug!(state = next.name(), "Submission settled");
        self.state.send_replace(next);
        true
    }
}

/// Classify a settled gateway reply.
pub fn resolve_reply(reply: &GatewayReply) -> RequestState {
    if !(200..300).contains(&reply.status) {
        return RequestState::Error(error_message(reply));
    }

    match serde_json::from_slice::<ExperimentResult>(strip_bom(&reply.body)) {
        Ok(result) => RequestState::Success(result),
        Err(e) => RequestState::Error(format!("Invalid response: {}", e)),
    }
}

/// Classify a call that never produced a reply.
pub fn resolve_transport_error(err: &TransportError) -> RequestState {
    RequestState::Error(
        err.message()
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
    )
}

fn error_message(reply: &GatewayReply) -> String {
    serde_json::from_slice::<ErrorBody>(strip_bom(&reply.body))
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", reply.status))
}
