//! Math Visualizer render service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use mathviz_core::config::SceneConfig;
use mathviz_render_service::error::AppError;
use mathviz_render_service::state::ServiceState;
use mathviz_render_service::{build_router, renderer_from_config};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Math Visualizer render service");

    // Read configuration from environment.
    let config = SceneConfig::from_env()?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "9000".to_string())
        .parse()
        .map_err(|e| AppError::Address(format!("PORT must be a valid u16: {e}")))?;

    let renderer = renderer_from_config(&config);
    tracing::info!(scenes = ?renderer.registry().list_keys(), "scenes available");

    let app =
        build_router(ServiceState::new(Arc::new(renderer))).layer(TraceLayer::new_for_http());

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Address(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
