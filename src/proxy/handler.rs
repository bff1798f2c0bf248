//! The TMDB proxy handler.
//!
//! # Flow
//! ```text
//! method != POST        → 405
//! no API key            → 500 "TMDB API key not configured"
//! body not JSON         → 500 "API request failed"
//! no endpoint           → 400
//! GET upstream          → relay status + JSON body
//! transport / non-JSON  → 500 "API request failed"
//! ```

use axum::http::Method;

use crate::config::ApiKey;
use crate::http::request::ProxyRequestBody;
use crate::http::response::ProxyResponse;
use crate::proxy::error::ProxyError;
use crate::proxy::upstream::{build_upstream_url, HttpUpstream, Upstream};

/// Stateless request translator. Shared read-only across requests.
#[derive(Debug)]
pub struct TmdbProxy<U = HttpUpstream> {
    api_key: Option<ApiKey>,
    base_url: String,
    upstream: U,
}

impl<U: Upstream> TmdbProxy<U> {
    pub fn new(api_key: Option<ApiKey>, base_url: impl Into<String>, upstream: U) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            upstream,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Turn one inbound request into exactly one response.
    pub async fn handle(&self, method: &Method, body: &[u8]) -> ProxyResponse {
        match self.forward(method, body).await {
            Ok(response) => response,
            Err(err) => {
                if err.is_unclassified() {
                    tracing::error!(error = %err, "TMDB API error");
                } else {
                    tracing::debug!(error = %err, "Rejected proxy request");
                }
                ProxyResponse::from(err)
            }
        }
    }

    async fn forward(&self, method: &Method, body: &[u8]) -> Result<ProxyResponse, ProxyError> {
        if method != Method::POST {
            return Err(ProxyError::MethodNotAllowed);
        }
        let api_key = self.api_key.as_ref().ok_or(ProxyError::MissingApiKey)?;
        let query = ProxyRequestBody::parse(body)?.validate()?;

        tracing::debug!(endpoint = %query.endpoint, "Forwarding to TMDB");
        let url = build_upstream_url(&self.base_url, &query, api_key);
        let reply = self.upstream.get(&url).await?;

        tracing::debug!(endpoint = %query.endpoint, status = %reply.status, "TMDB replied");
        Ok(ProxyResponse::passthrough(reply.status, &reply.body))
    }
}
