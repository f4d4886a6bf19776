//! Render service error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mathviz_core::config::ConfigError;
use mathviz_core::error::PipelineError;
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the render service and worker.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `HOST`/`PORT` do not form a socket address.
    #[error("invalid listen address: {0}")]
    Address(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable failure reason.
    pub message: String,
}

/// HTTP-layer wrapper around `PipelineError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PipelineError::MalformedOutput(_) => StatusCode::BAD_REQUEST,
            PipelineError::Unsupported(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::CollaboratorUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PipelineError::Renderer(_) | PipelineError::Catastrophic(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.0.code(),
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
