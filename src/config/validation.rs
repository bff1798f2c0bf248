//! Configuration validation.
//!
//! Serde handles syntax; this module checks values:
//! - Addresses parse as socket addresses
//! - Upstream base URL is an absolute http(s) URL
//! - Route path is absolute, body limit is non-zero
//!
//! Returns all validation errors, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("listener.route_path `{0}` must start with '/', be a literal path and not be /health")]
    RoutePath(String),

    #[error("upstream.base_url `{0}` is not a valid http(s) URL")]
    BaseUrl(String),

    #[error("upstream.api_key_env must not be empty")]
    ApiKeyEnv,

    #[error("upstream.timeout_secs must be greater than zero")]
    UpstreamTimeout,

    #[error("listener.request_timeout_secs must be greater than zero")]
    RequestTimeout,

    #[error("security.max_body_size must be greater than zero")]
    BodyLimit,

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),
}

/// Route paths are mounted verbatim, so they must not contain Axum
/// capture syntax or collide with the health route.
fn is_literal_route(path: &str) -> bool {
    path.starts_with('/')
        && path != "/health"
        && !path.contains(['{', '}', '*', '?', '#'])
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let listener = &config.listener;
    if listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(listener.bind_address.clone()));
    }
    if !is_literal_route(&listener.route_path) {
        errors.push(ValidationError::RoutePath(listener.route_path.clone()));
    }
    if listener.request_timeout_secs == Some(0) {
        errors.push(ValidationError::RequestTimeout);
    }

    let upstream = &config.upstream;
    match Url::parse(&upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::BaseUrl(upstream.base_url.clone())),
    }
    if upstream.api_key_env.trim().is_empty() {
        errors.push(ValidationError::ApiKeyEnv);
    }
    if upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::UpstreamTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::BodyLimit);
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "localhost".into();
        config.listener.route_path = "api/tmdb".into();
        config.upstream.base_url = "ftp://example.com/3".into();
        config.security.max_body_size = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::RoutePath("api/tmdb".into()),
                ValidationError::BaseUrl("ftp://example.com/3".into()),
                ValidationError::BodyLimit,
            ]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ProxyConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::MetricsAddress("nope".into())]
        );
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let mut config = ProxyConfig::default();
        config.upstream.timeout_secs = Some(0);
        config.listener.request_timeout_secs = Some(0);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::UpstreamTimeout));
        assert!(errors.contains(&ValidationError::RequestTimeout));
    }

    #[test]
    fn test_route_path_must_be_literal() {
        for path in ["/health", "/api/{id}", "/api/*rest", "tmdb"] {
            let mut config = ProxyConfig::default();
            config.listener.route_path = path.into();
            assert_eq!(
                validate_config(&config).unwrap_err(),
                vec![ValidationError::RoutePath(path.into())]
            );
        }
    }

    #[test]
    fn test_local_http_base_url_allowed() {
        let mut config = ProxyConfig::default();
        config.upstream.base_url = "http://127.0.0.1:9000/3".into();
        assert!(validate_config(&config).is_ok());
    }
}
