//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!
//! environment (.env honoured)
//!     → secret.rs (ApiKey, redacted)
//!
//! Both handed to HttpServer::new at startup.
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so the proxy runs without a config file
//! - The API key only ever comes from the environment, never from the file

pub mod loader;
pub mod schema;
pub mod secret;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, SecurityConfig, UpstreamConfig,
};
pub use secret::ApiKey;
