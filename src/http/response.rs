//! Outbound response shaping.
//!
//! Upstream replies are relayed with their status and JSON body plus
//! `Content-Type: application/json` and `Access-Control-Allow-Origin: *`.
//! Locally generated errors only carry the content type.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::proxy::error::ProxyError;

/// One response for one proxy request.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// JSON-encoded text.
    pub body: String,
}

impl ProxyResponse {
    /// Relay an upstream reply to the browser.
    pub fn passthrough(status: StatusCode, body: &Value) -> Self {
        let mut response = Self::json(status, body);
        response.headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        response
    }

    fn json(status: StatusCode, body: &Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Self {
            status,
            headers,
            body: body.to_string(),
        }
    }

    /// Decode the body back into JSON.
    pub fn json_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

impl From<ProxyError> for ProxyResponse {
    fn from(err: ProxyError) -> Self {
        Self::json(err.status(), &err.to_json())
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
