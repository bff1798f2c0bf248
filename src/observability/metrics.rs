//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tmdb_proxy_requests_total` (counter): requests by method and status
//! - `tmdb_proxy_request_duration_seconds` (histogram): handler latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve it on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished proxy request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        "tmdb_proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("tmdb_proxy_request_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}
