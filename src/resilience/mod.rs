//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → timeouts.rs (one absolute deadline for the whole exchange)
//!     → ForwardOutcome: Ok | TimedOut | TransportFailed
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every backend call has a deadline
//! - No retries: a failed or expired call is reported once, immediately

pub mod timeouts;

pub use timeouts::{with_deadline, Deadline, ForwardOutcome};
