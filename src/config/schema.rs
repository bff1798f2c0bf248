//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the TMDB proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, route path).
    pub listener: ListenerConfig,

    /// Upstream API settings.
    pub upstream: UpstreamConfig,

    /// Inbound request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Path the proxy handler is mounted on.
    pub route_path: String,

    /// Also mount the handler on `/.netlify/functions/tmdb` so existing
    /// frontends keep working unchanged.
    pub netlify_alias: bool,

    /// Server-side limit on the whole request/response cycle, in seconds.
    /// Unset means no limit beyond the transport's own.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            route_path: "/api/tmdb".to_string(),
            netlify_alias: true,
            request_timeout_secs: None,
        }
    }
}

/// Path the Netlify function used to be served from.
pub const NETLIFY_FUNCTION_PATH: &str = "/.netlify/functions/tmdb";

/// Upstream (TMDB) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL every endpoint is appended to, without trailing slash.
    pub base_url: String,

    /// Name of the environment variable holding the API key.
    pub api_key_env: String,

    /// Outbound request timeout in seconds. Unset keeps the client default.
    pub timeout_secs: Option<u64>,

    /// User-Agent sent upstream.
    pub user_agent: String,

    /// Honour HTTP_PROXY/HTTPS_PROXY for outbound calls.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key_env: "TMDB_API_KEY".to_string(),
            timeout_secs: None,
            user_agent: concat!("tmdb-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // 64KB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstream.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.upstream.api_key_env, "TMDB_API_KEY");
        assert!(config.upstream.timeout_secs.is_none());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            route_path = "/tmdb"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.route_path, "/tmdb");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.listener.netlify_alias);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }
}
