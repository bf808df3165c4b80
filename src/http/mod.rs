//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/run
//!     → server.rs (Axum setup, gateway steps in order)
//!     → request.rs (size-limited read, JSON decode)
//!     → upstream::client (forward under deadline)
//!     → response.rs (error taxonomy or transparent relay + x-request-id)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{strip_bom, X_REQUEST_ID};
pub use response::{ErrorBody, GatewayError, Relay};
pub use server::{build_router, AppState, HttpServer, ServerError, QUERY_PATH};
