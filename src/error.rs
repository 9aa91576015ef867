// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// Enrichment failures (Climatiq/OpenWeather) are normally caught inside the
/// ingest pipeline and recorded in the record's `extra` map; they only reach
/// an HTTP response if a handler calls a client directly.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Climatiq API error: {0}")]
    ClimatiqApi(String),

    #[error("OpenWeather API error: {0}")]
    WeatherApi(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::ClimatiqApi(_) | AppError::WeatherApi(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
