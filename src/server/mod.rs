use crate::config::{Config, ServerConfig};
use crate::gateway::{MovieProvider, TmdbGateway};
use anyhow::{Context, Result};
use axum::{http::HeaderValue, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod routes;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    /// Upstream movie provider shared by all request tasks
    pub provider: Arc<dyn MovieProvider>,
    pub config: Arc<Config>,
}

impl AppContext {
    /// Build a context backed by the TMDB gateway described in `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let gateway = TmdbGateway::new(&config.tmdb)?;
        Ok(Self {
            provider: Arc::new(gateway),
            config: Arc::new(config),
        })
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = cors_layer(&ctx.config.server);

    routes::movie_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Credentialed CORS restricted to the configured origins.
///
/// Methods and headers are mirrored from the preflight because wildcards
/// cannot be combined with credentials.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Start the HTTP server and run until a shutdown signal arrives
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::from_config(config)?;
    tracing::info!(
        provider = ctx.provider.name(),
        available = ctx.provider.is_available(),
        "Movie provider ready"
    );
    if !ctx.provider.is_available() {
        tracing::warn!(
            "{} is not configured; search and detail requests will fail",
            crate::config::API_KEY_ENV
        );
    }

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on the first of Ctrl+C or (on unix) SIGTERM.
///
/// A handler that fails to install never fires, so the other one still can.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
        "SIGINT"
    };

    tokio::select! {
        name = interrupt => tracing::info!(signal = name, "Shutting down"),
        name = terminate() => tracing::info!(signal = name, "Shutting down"),
    }
}

#[cfg(unix)]
async fn terminate() -> &'static str {
    use signal::unix::{signal as unix_signal, SignalKind};

    match unix_signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
    "SIGTERM"
}

#[cfg(not(unix))]
async fn terminate() -> &'static str {
    std::future::pending::<&'static str>().await
}
