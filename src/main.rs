//! TMDB API Proxy
//!
//! Forwards browser requests to the TMDB API, injecting the server-held API
//! key so it never reaches the client.
//!
//! ```text
//!   Browser                          tmdb-proxy                           TMDB
//!   POST {endpoint, params} ──▶ validate ─▶ build URL + api_key ─▶ GET /3/{endpoint}
//!   status + JSON body     ◀── relay (Content-Type, CORS *)    ◀── status + JSON
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tmdb_proxy::config::validation::validate_config;
use tmdb_proxy::config::{load_config, ApiKey, ConfigError, ProxyConfig};
use tmdb_proxy::observability::{logging, metrics};
use tmdb_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "tmdb-proxy", version)]
#[command(about = "Proxy for the TMDB API that keeps the API key server-side", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);
    tracing::info!("tmdb-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let api_key = ApiKey::from_env(&config.upstream.api_key_env);
    if api_key.is_none() {
        tracing::warn!(
            env = %config.upstream.api_key_env,
            "TMDB API key not configured; proxy requests will fail with 500"
        );
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        route = %config.listener.route_path,
        upstream = %config.upstream.base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address already validated.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(config, api_key)?;
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown.trigger_on_signal().await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
