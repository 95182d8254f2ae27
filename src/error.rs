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
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Token exchange with the identity provider failed.
    #[error("LinkedIn auth error: {0}")]
    UpstreamAuth(String),

    /// Identity provider returned an error or unusable profile data.
    #[error("LinkedIn profile error: {0}")]
    UpstreamProfile(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Request exceeded the transport-level budget.
    #[error("Request timed out")]
    Timeout,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message shown to clients for any 5xx response.
    pub const INTERNAL_MESSAGE: &'static str = "Internal Server Error. Something Bad Happened!";

    /// Message shown to clients when the identity provider could not resolve a profile.
    pub const PROFILE_VALIDATION_MESSAGE: &'static str = "Failed to Validate LinkedIn Profile";

    pub const TIMEOUT_MESSAGE: &'static str = "Request Timed Out";

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::UpstreamAuth(_) | AppError::UpstreamProfile(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to return to the client.
    pub fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::UpstreamAuth(_) | AppError::UpstreamProfile(_) => {
                Self::PROFILE_VALIDATION_MESSAGE.to_string()
            }
            AppError::Timeout => Self::TIMEOUT_MESSAGE.to_string(),
            AppError::Storage(_) | AppError::Internal(_) => Self::INTERNAL_MESSAGE.to_string(),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::UpstreamAuth(msg) | AppError::UpstreamProfile(msg) => {
                tracing::warn!(error = %msg, "Failed to resolve LinkedIn profile");
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
            }
            AppError::Timeout => {
                tracing::warn!("Request timed out");
            }
            AppError::BadRequest(_) | AppError::NotFound(_) => {}
        }

        let body = ErrorResponse {
            error: self.client_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
