//! Math Visualizer API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, Method, header};
use mathviz_api::error::AppError;
use mathviz_api::orchestrator::Orchestrator;
use mathviz_api::routes::generate::RENDER_TIER_HEADER;
use mathviz_api::state::AppState;
use mathviz_core::config::{LanguageConfig, RenderConfig};
use mathviz_core::ids::RandomArtifactIds;
use mathviz_language::{Explainer, Refiner, completion_from_config};
use mathviz_render::RenderDispatcher;
use tower_http::cors::CorsLayer;
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

    tracing::info!("Starting Math Visualizer API server");

    // Read configuration from environment.
    let language = LanguageConfig::from_env()?;
    let render = RenderConfig::from_env()?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
    let frontend_origin: HeaderValue = std::env::var("FRONTEND_ORIGIN")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("FRONTEND_ORIGIN is not a valid origin: {e}")))?;

    tokio::fs::create_dir_all(&render.renders_dir).await?;

    // Build the pipeline. Mode selection happens once, here.
    let completion = completion_from_config(&language)?;
    let dispatcher = RenderDispatcher::from_config(&render, Arc::new(RandomArtifactIds))?;
    let orchestrator = Orchestrator::new(
        Refiner::new(completion.clone()),
        dispatcher,
        Explainer::new(completion),
    );
    let app_state = AppState::new(Arc::new(orchestrator), render.renders_dir.clone());

    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(RENDER_TIER_HEADER)]);

    let app = mathviz_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
