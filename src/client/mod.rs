//! Client side of the query gateway.
//!
//! # Data Flow
//! ```text
//! user submission
//!     → machine.rs (blank guard, Idle/Success/Error → Loading)
//!     → transport.rs (POST {"query": ...} to the gateway)
//!     → machine.rs (reply → Success | Error)
//!     → watch channel → renderer
//! ```

pub mod machine;
pub mod state;
pub mod transport;
pub mod types;

pub use machine::{resolve_reply, resolve_transport_error, ResultStateMachine, FALLBACK_ERROR_MESSAGE};
pub use state::RequestState;
pub use transport::{GatewayReply, GatewayTransport, HttpTransport, TransportError};
pub use types::{ExperimentResult, HitlReason, HitlReview, Query, QueryRequest, Source};
