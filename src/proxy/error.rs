//! Proxy error taxonomy and its mapping to HTTP status codes.

use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can stop a proxy request short of an upstream reply.
///
/// The first three variants carry fixed client-facing messages. The rest are
/// unclassified failures: they all surface as `API request failed` with the
/// underlying message as `details`.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("TMDB API key not configured")]
    MissingApiKey,

    #[error("Missing endpoint parameter")]
    MissingEndpoint,

    /// Request body was not a JSON object of the expected shape.
    #[error("{0}")]
    InvalidBody(#[source] serde_json::Error),

    /// Transport failure talking to TMDB. The URL is stripped on conversion.
    #[error("{0}")]
    Upstream(#[source] reqwest::Error),

    /// TMDB answered with something that is not JSON.
    #[error("{0}")]
    UpstreamBody(#[source] serde_json::Error),
}

/// Message used for every unclassified failure.
pub const REQUEST_FAILED: &str = "API request failed";

impl ProxyError {
    /// HTTP status the client sees for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::MissingEndpoint => StatusCode::BAD_REQUEST,
            ProxyError::MissingApiKey
            | ProxyError::InvalidBody(_)
            | ProxyError::Upstream(_)
            | ProxyError::UpstreamBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this failure falls into the generic `API request failed` path.
    pub fn is_unclassified(&self) -> bool {
        matches!(
            self,
            ProxyError::InvalidBody(_) | ProxyError::Upstream(_) | ProxyError::UpstreamBody(_)
        )
    }

    /// JSON body sent back to the client.
    pub fn to_json(&self) -> serde_json::Value {
        if self.is_unclassified() {
            serde_json::json!({ "error": REQUEST_FAILED, "details": self.to_string() })
        } else {
            serde_json::json!({ "error": self.to_string() })
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest embeds the request URL in its message, and ours carries the key.
        ProxyError::Upstream(err.without_url())
    }
}
