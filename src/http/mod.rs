//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, typed body, validation)
//!     → proxy::TmdbProxy (key injection, upstream call)
//!     → response.rs (status, JSON body, CORS header)
//!     → Send to client
//! ```

pub mod health;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, ProxyQuery, ProxyRequestBody};
pub use response::ProxyResponse;
pub use server::{AppState, HttpServer};
