//! API router configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health, init, service_info, try_guess, AppState};
use crate::session::spawn_sweeper;

/// Create the API router with all routes configured.
pub fn create_router() -> Router {
    create_router_with_state(AppState::new())
}

/// Create the API router with custom state.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/init", get(init))
        .route("/try", get(try_guess))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Stop accepting connections on ctrl-c and drain in-flight requests.
    pub graceful_shutdown: bool,
    /// Period of the background purge, if any.
    pub sweep_interval: Option<Duration>,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn without_graceful_shutdown(mut self) -> Self {
        self.graceful_shutdown = false;
        self
    }

    /// Set the background purge period; zero disables it.
    pub fn with_sweep_interval(mut self, every: Duration) -> Self {
        self.sweep_interval = (!every.is_zero()).then_some(every);
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            graceful_shutdown: true,
            sweep_interval: Some(Duration::from_secs(30)),
        }
    }
}

/// Start the API server.
pub async fn serve(config: ServerConfig) -> crate::Result<()> {
    serve_with_state(config, AppState::new()).await
}

/// Start the API server with custom state.
pub async fn serve_with_state(config: ServerConfig, state: AppState) -> crate::Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let sweeper = config
        .sweep_interval
        .map(|every| spawn_sweeper(Arc::clone(state.store()), every));
    let router = create_router_with_state(state);

    tracing::info!("Starting number-guess API server on {}", addr);

    let served = if config.graceful_shutdown {
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    } else {
        axum::serve(listener, router).await
    };

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    served?;

    tracing::info!("number-guess API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
