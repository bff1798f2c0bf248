//! Inbound request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Parse the proxy request body into a typed shape
//! - Validate required fields before anything is forwarded

use axum::http::{HeaderValue, Request};
use serde::de::Error as _;
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::proxy::error::ProxyError;

/// Request ID generator for `SetRequestIdLayer` (`x-request-id` header).
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// JSON body posted by the browser: `{ "endpoint": "...", "params": "..." }`.
///
/// Unknown fields are ignored. Fields of the wrong type count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyRequestBody {
    pub endpoint: Option<String>,
    pub params: Option<String>,
}

/// A validated request, ready to be turned into an upstream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyQuery {
    /// Path below the upstream base, e.g. `movie/550`.
    pub endpoint: String,
    /// Raw query fragment, empty when the caller sent none.
    pub params: String,
}

impl ProxyRequestBody {
    /// Parse raw body bytes.
    ///
    /// Only unparseable JSON (including an empty body) and `null` are
    /// `InvalidBody`. Any other JSON value parses; values that are not
    /// objects simply carry no fields and fail validation.
    pub fn parse(body: &[u8]) -> Result<Self, ProxyError> {
        let value: Value = serde_json::from_slice(body).map_err(ProxyError::InvalidBody)?;
        match value {
            Value::Null => Err(ProxyError::InvalidBody(serde_json::Error::custom(
                "request body is null",
            ))),
            Value::Object(fields) => Ok(Self {
                endpoint: string_field(&fields, "endpoint"),
                params: string_field(&fields, "params"),
            }),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(self) -> Result<ProxyQuery, ProxyError> {
        let endpoint = match self.endpoint {
            Some(endpoint) if !endpoint.is_empty() => endpoint,
            _ => return Err(ProxyError::MissingEndpoint),
        };
        Ok(ProxyQuery {
            endpoint,
            params: self.params.unwrap_or_default(),
        })
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_validate(body: &str) -> Result<ProxyQuery, ProxyError> {
        ProxyRequestBody::parse(body.as_bytes())?.validate()
    }

    #[test]
    fn test_endpoint_only() {
        let query = parse_and_validate(r#"{"endpoint":"movie/550"}"#).unwrap();
        assert_eq!(query.endpoint, "movie/550");
        assert_eq!(query.params, "");
    }

    #[test]
    fn test_endpoint_and_params() {
        let query =
            parse_and_validate(r#"{"endpoint":"search/movie","params":"query=matrix"}"#).unwrap();
        assert_eq!(query.params, "query=matrix");
    }

    #[test]
    fn test_null_params_treated_as_absent() {
        let query = parse_and_validate(r#"{"endpoint":"movie/550","params":null}"#).unwrap();
        assert_eq!(query.params, "");
    }

    #[test]
    fn test_missing_or_empty_endpoint() {
        for body in [
            r#"{}"#,
            r#"{"endpoint":""}"#,
            r#"{"endpoint":null}"#,
            r#"{"endpoint":550}"#,
            r#"{"params":"a=b"}"#,
        ] {
            assert!(
                matches!(parse_and_validate(body), Err(ProxyError::MissingEndpoint)),
                "body {body} should be a missing endpoint"
            );
        }
    }

    #[test]
    fn test_non_object_json_has_no_endpoint() {
        for body in [
            r#"["search/movie","query=x"]"#,
            "[1,2]",
            "[]",
            "42",
            r#""movie/550""#,
            "true",
        ] {
            assert_eq!(
                ProxyRequestBody::parse(body.as_bytes()).unwrap(),
                ProxyRequestBody::default(),
                "body {body} should parse with no fields"
            );
            assert!(
                matches!(parse_and_validate(body), Err(ProxyError::MissingEndpoint)),
                "body {body} should be a missing endpoint"
            );
        }
    }

    #[test]
    fn test_non_string_params_treated_as_absent() {
        let query = parse_and_validate(r#"{"endpoint":"movie/550","params":5}"#).unwrap();
        assert_eq!(query.params, "");
    }

    #[test]
    fn test_malformed_bodies_are_invalid() {
        for body in ["not-json", "", "null", "{\"endpoint\":"] {
            assert!(
                matches!(parse_and_validate(body), Err(ProxyError::InvalidBody(_))),
                "body {body:?} should fail to parse"
            );
        }
    }

    #[test]
    fn test_request_ids_are_unique() {
        let request = Request::new(());
        let mut make = MakeRequestUuid;
        let a = make.make_request_id(&request).unwrap();
        let b = make.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
