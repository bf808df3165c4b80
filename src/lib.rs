//! Query gateway for a retrieval-augmented-generation backend.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser / rag-cli                 GATEWAY                        RAG backend
//!  ┌──────────────────┐      ┌───────────────────────────┐
//!  │ client::machine  │ POST │ http::server              │  POST  ┌─────────────┐
//!  │ Idle → Loading   │─────▶│ config? → body? → forward │───────▶│ /api/run    │
//!  │ → Success|Error  │◀─────│ classify → relay/x-req-id │◀───────│             │
//!  └──────────────────┘      │ resilience::timeouts (30s)│        └─────────────┘
//!                            └───────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod upstream;

// Client side
pub mod client;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
