// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod users;

use crate::error::AppError;
use crate::AppState;
use axum::error_handling::HandleErrorLayer;
use axum::http::Method;
use axum::{routing::get, BoxError, Router};
use std::sync::Arc;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// All routes live under this prefix.
pub const BASE_PATH: &str = "/volunteering";

/// Health check response
async fn health_check() -> &'static str {
    "Backend! OK"
}

/// Map a failure from the timeout middleware onto the JSON error envelope.
async fn handle_timeout(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(anyhow::anyhow!("unhandled middleware error: {}", err))
    }
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Any origin, with credentials: echo the caller's origin and headers back.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request());

    let timeout = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_timeout))
        .layer(TimeoutLayer::new(state.config.request_timeout));

    let api = Router::new()
        .route("/health", get(health_check))
        .merge(users::routes());

    Router::new()
        .nest(BASE_PATH, api)
        .layer(cors)
        .layer(timeout)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
