//! TMDB proxying subsystem.
//!
//! # Data Flow
//! ```text
//! method + raw body
//!     → handler.rs (method, key, body checks)
//!     → upstream.rs (URL with injected key, one GET)
//!     → http::response::ProxyResponse
//! ```
//!
//! # Design Decisions
//! - The API key is injected at construction, never read per request
//! - One outbound call per request: no retries, no caching
//! - Every failure becomes a structured JSON response

pub mod error;
pub mod handler;
pub mod upstream;

pub use error::ProxyError;
pub use handler::TmdbProxy;
pub use upstream::{build_upstream_url, HttpUpstream, Upstream, UpstreamReply};
