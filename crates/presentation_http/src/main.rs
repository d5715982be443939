//! Event planner HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use axum::http::{HeaderValue, Method};
use infrastructure::{
    AppConfig, InMemoryEventStore, ServerConfig, WeatherProviderAdapter, init_tracing,
};
use presentation_http::{drain_deadline, routes, spawn_cache_sweep_task, state::AppState};
use tokio::{net::TcpListener, signal, sync::watch};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;
    init_tracing(&config.logging())?;

    info!("Event planner v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        timezone = %config.planner.timezone,
        cache_ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    let provider = WeatherProviderAdapter::with_config(config.weather.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize weather provider: {e}"))?;
    let state = AppState::from_config(
        &config,
        Arc::new(provider),
        Arc::new(InMemoryEventStore::new()),
    )?;

    let sweep_handle =
        spawn_cache_sweep_task(Arc::clone(state.weather.cache()), config.sweep_interval());

    // Middleware order: first added = innermost
    let app = routes::create_router(state)
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_json_bytes,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Waiting up to {:?} for connections to close...", shutdown_timeout);
            shutdown_tx.send_replace(true);
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        () = drain_deadline(shutdown_rx, shutdown_timeout) => {
            warn!(
                timeout_secs = shutdown_timeout.as_secs(),
                "Connections still open after shutdown timeout, exiting"
            );
        }
    }

    sweep_handle.abort();
    info!("Server shutdown complete");

    Ok(())
}

/// Permissive CORS when no origins are configured, otherwise restricted
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
