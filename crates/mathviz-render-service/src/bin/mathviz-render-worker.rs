//! Render-worker CLI: renders one request file and prints the artifact path.
//!
//! Logs go to stderr; stdout carries only the absolute artifact path.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mathviz_core::config::SceneConfig;
use mathviz_render_service::renderer_from_config;
use mathviz_render_service::worker::render_request_file;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mathviz-render-worker", version, about = "Render one visualization request")]
struct Cli {
    /// JSON file of shape `{"type": ..., "parameters": {...}}`.
    request: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = match SceneConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let renderer = renderer_from_config(&config);
    match render_request_file(&renderer, &cli.request).await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
