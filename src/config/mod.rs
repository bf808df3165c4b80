//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply API_URL override)
//!     → validation.rs (semantic checks, resolve backend query URL)
//!     → GatewayConfig (validated, immutable)
//!     → handed to HttpServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, API_URL_ENV};
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::BackendConfig;
pub use schema::TimeoutConfig;
pub use validation::{resolve_query_url, ValidationError};
