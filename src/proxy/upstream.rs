//! Upstream URL construction and the outbound HTTP transport.

use std::future::Future;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;

use crate::config::{ApiKey, UpstreamConfig};
use crate::http::request::ProxyQuery;
use crate::proxy::error::ProxyError;

/// What TMDB sent back: status and decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

/// Outbound transport used by the proxy handler.
///
/// Implementations issue exactly one GET per call and must not retry.
pub trait Upstream: Send + Sync + 'static {
    fn get(&self, url: &str) -> impl Future<Output = Result<UpstreamReply, ProxyError>> + Send;
}

/// Build `<base>/<endpoint>?api_key=<key>[&<params>]`.
///
/// `endpoint` and `params` are concatenated verbatim; callers are trusted to
/// supply already-encoded values.
pub fn build_upstream_url(base_url: &str, query: &ProxyQuery, api_key: &ApiKey) -> String {
    let separator = if query.params.is_empty() { "" } else { "&" };
    format!(
        "{}/{}?api_key={}{}{}",
        base_url.trim_end_matches('/'),
        query.endpoint,
        api_key.expose(),
        separator,
        query.params
    )
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Upstream for HttpUpstream {
    async fn get(&self, url: &str) -> Result<UpstreamReply, ProxyError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).map_err(ProxyError::UpstreamBody)?;
        Ok(UpstreamReply { status, body })
    }
}
