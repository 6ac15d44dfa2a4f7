use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use config_store::ConfigStoreError;
use serde::Serialize;
use thiserror::Error;

use crate::core::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Payload unavailable or undecodable. Startup only.
    #[error(transparent)]
    Store(ConfigStoreError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("Configuration not found")]
    NotFound,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,

            // 5xx (startup-only in practice)
            AppError::Config(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Store(ConfigStoreError::Decode(_)) => "DECODE_ERROR",
            AppError::Store(_) => "PAYLOAD_UNAVAILABLE",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::NotFound => "NOT_FOUND",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Lookup misses become a plain 404; everything else is a store failure.
impl From<ConfigStoreError> for AppError {
    fn from(err: ConfigStoreError) -> Self {
        if err.is_not_found() {
            AppError::NotFound
        } else {
            AppError::Store(err)
        }
    }
}
