//! Upstream (backend) subsystem.
//!
//! # Data Flow
//! ```text
//! decoded inbound JSON
//!     → client.rs (POST to the backend query URL, read full body)
//!     → resilience::timeouts (whole exchange bounded by one deadline)
//!     → BackendReply (status, correlation header, body bytes or read failure)
//! ```
//!
//! # Design Decisions
//! - One outbound call per inbound request; no retries, no caching
//! - Body bytes are returned raw; JSON validation belongs to the gateway

pub mod client;

pub use client::{BackendClient, BackendReply};
