//! Deadline enforcement for the forwarding call.
//!
//! # Responsibilities
//! - Compute one absolute deadline per forwarded request
//! - Drive the backend call until it settles or the deadline passes
//! - Report expiry as its own variant rather than as a transport error
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; the timer lives inside the wrapper's
//!   future, so it is dropped on every exit path
//! - A single absolute deadline, never re-armed: there are no retries

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// An absolute point in time after which the forwarding call is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(Instant);

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self(Instant::now() + budget)
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.0
    }
}

/// Result of a deadline-bounded call.
#[derive(Debug)]
pub enum ForwardOutcome<T> {
    /// The call settled in time.
    Ok(T),
    /// The deadline passed before the call settled.
    TimedOut,
    /// The call failed at the transport level (refused, DNS, TLS, reset...).
    TransportFailed(String),
}

impl<T> ForwardOutcome<T> {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ForwardOutcome::Ok(_) => "ok",
            ForwardOutcome::TimedOut => "timed_out",
            ForwardOutcome::TransportFailed(_) => "transport_failed",
        }
    }
}

/// Run `fut` until it settles or `deadline` passes.
///
/// A failure that surfaces after the deadline has passed is reported as
/// `TimedOut`: the underlying client may notice the expiry first.
pub async fn with_deadline<F, T, E>(deadline: Deadline, fut: F) -> ForwardOutcome<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match tokio::time::timeout_at(deadline.instant(), fut).await {
        Ok(Ok(value)) => ForwardOutcome::Ok(value),
        Ok(Err(_)) if deadline.has_passed() => ForwardOutcome::TimedOut,
        Ok(Err(e)) => ForwardOutcome::TransportFailed(e.to_string()),
        Err(_elapsed) => ForwardOutcome::TimedOut,
    }
}
