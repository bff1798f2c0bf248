use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::proxy::Upstream;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub api_key_configured: bool,
}

/// `GET /health`. Reports whether a key is present, never the key itself.
pub async fn get_health<U: Upstream>(State(state): State<AppState<U>>) -> Json<HealthStatus> {
    let api_key_configured = state.proxy.has_api_key();
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: if api_key_configured { "operational" } else { "degraded" },
        api_key_configured,
    })
}
