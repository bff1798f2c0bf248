//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the proxy and health handlers
//! - Wire up middleware (tracing, body limit, request ID, optional timeout)
//! - Serve on a listener until the shutdown signal fires

use axum::{
    body::Bytes,
    extract::State,
    handler::Handler,
    http::Method,
    response::{IntoResponse, Response},
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::schema::NETLIFY_FUNCTION_PATH;
use crate::config::{ApiKey, ProxyConfig};
use crate::http::health::get_health;
use crate::http::request::MakeRequestUuid;
use crate::observability::metrics;
use crate::proxy::{HttpUpstream, TmdbProxy, Upstream};

/// Application state injected into handlers.
pub struct AppState<U = HttpUpstream> {
    pub proxy: Arc<TmdbProxy<U>>,
}

impl<U> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            proxy: self.proxy.clone(),
        }
    }
}

/// HTTP server for the TMDB proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server that talks to the configured upstream over HTTP.
    pub fn new(config: ProxyConfig, api_key: Option<ApiKey>) -> Result<Self, reqwest::Error> {
        let upstream = HttpUpstream::new(&config.upstream)?;
        let proxy = TmdbProxy::new(api_key, config.upstream.base_url.clone(), upstream);
        Ok(Self::with_proxy(config, proxy))
    }

    /// Create a server around an already-built proxy.
    pub fn with_proxy<U: Upstream>(config: ProxyConfig, proxy: TmdbProxy<U>) -> Self {
        let state = AppState {
            proxy: Arc::new(proxy),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router<U: Upstream>(config: &ProxyConfig, state: AppState<U>) -> Router {
        let route_path = config.listener.route_path.as_str();
        let proxy_route = proxy_route::<U>(config.security.max_body_size);
        let mut router = Router::new()
            .route(route_path, proxy_route.clone())
            .route("/health", get(get_health::<U>));

        if config.listener.netlify_alias && route_path != NETLIFY_FUNCTION_PATH {
            router = router.route(NETLIFY_FUNCTION_PATH, proxy_route);
        }

        let mut router = router.with_state(state);
        if let Some(secs) = config.listener.request_timeout_secs {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(secs)));
        }

        router
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route = %self.config.listener.route_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The proxy route. Only POST bodies are size-limited; every other method
/// falls through to the JSON 405 without its body being read.
fn proxy_route<U: Upstream>(max_body_size: usize) -> MethodRouter<AppState<U>> {
    post(proxy_handler::<U>.layer(RequestBodyLimitLayer::new(max_body_size)))
        .fallback(method_not_allowed::<U>)
}

async fn proxy_handler<U: Upstream>(
    State(state): State<AppState<U>>,
    method: Method,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let response = state.proxy.handle(&method, &body).await;
    metrics::record_request(method.as_str(), response.status.as_u16(), start_time);
    response.into_response()
}

async fn method_not_allowed<U: Upstream>(
    State(state): State<AppState<U>>,
    method: Method,
) -> Response {
    let start_time = Instant::now();
    let response = state.proxy.handle(&method, &[]).await;
    metrics::record_request(method.as_str(), response.status.as_u16(), start_time);
    response.into_response()
}
