pub mod handlers;
pub mod types;

use crate::{config::Config, service::LocalService, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use handlers::{AppState, UPLOAD_BODY_LIMIT};
use std::{future::Future, net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// All endpoints hang off this prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Builds the full router for the given state. Pure, so tests can
/// drive it directly without binding a socket.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/hello", get(handlers::hello))
        // No predict body cap, so oversized bodies still get an
        // envelope response instead of a framework 413.
        .route(
            "/predict",
            post(handlers::predict).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/upload",
            post(handlers::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
}

/// Runs the server until the first SIGINT or SIGTERM.
pub async fn run(config: Config) -> Result<()> {
    let shutdown = shutdown_signal()?;
    run_until(config, shutdown).await
}

/// Runs the server until the given future resolves. The shutdown
/// trigger is passed in explicitly rather than installed globally so
/// callers (and tests) own the stop path.
pub async fn run_until(
    config: Config,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let upload_dir = PathBuf::from(&config.upload.dir);
    tokio::fs::create_dir_all(&upload_dir).await?;

    let state = AppState {
        service: Arc::new(LocalService::new()),
        upload_dir,
    };
    let app = app(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");

    Ok(())
}

/// Resolves on the first SIGINT or SIGTERM. Installing the signal
/// streams is fallible, so it happens here rather than inside the
/// returned future.
#[cfg(unix)]
fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("Received SIGINT, shutting down"),
            _ = terminate.recv() => info!("Received SIGTERM, shutting down"),
        }
    })
}

#[cfg(not(unix))]
fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static> {
    Ok(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, shutting down");
        }
    })
}
