// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Volunteer registration routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::models::{EnrollmentForm, User};
use crate::services::{apply_enrollment, user_from_profile};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/", get(missing_email))
        .route("/users/{email}", get(get_user).put(update_user))
}

/// Success envelope: `{"payload": ...}`.
#[derive(Serialize)]
pub struct Payload<T> {
    pub payload: T,
}

impl<T> Payload<T> {
    fn json(payload: T) -> Json<Self> {
        Json(Self { payload })
    }
}

/// Body for `POST /users`.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateUserRequest {
    /// LinkedIn authorization code
    #[serde(default)]
    pub code: String,
    /// Redirect URI the code was issued for
    #[serde(default)]
    pub redirect_uri: String,
}

fn parse_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::BadRequest("Invalid JSON Request Body".to_string())
    })
}

/// Register a volunteer from a LinkedIn authorization code.
async fn create_user(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Payload<User>>)> {
    let request = parse_body(body)?;

    if request.code.is_empty() {
        return Err(AppError::BadRequest("Auth Code is required".to_string()));
    }
    if request.redirect_uri.is_empty() {
        return Err(AppError::BadRequest("Redirect URI is required".to_string()));
    }

    tracing::info!(redirect_uri = %request.redirect_uri, "Resolving LinkedIn profile");

    let profile = state
        .identity
        .resolve_profile(&request.code, &request.redirect_uri)
        .await?;

    let user = user_from_profile(profile, chrono::Utc::now())?;
    let user = state.users.create_user(user).await?;

    Ok((StatusCode::CREATED, Payload::json(user)))
}

/// Submit the one-time enrollment form.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    body: std::result::Result<Json<EnrollmentForm>, JsonRejection>,
) -> Result<Json<Payload<User>>> {
    let form = parse_body(body)?;

    let user = state.users.get_user(&email).await?;
    let user = apply_enrollment(user, form)?;
    let user = state.users.update_user(user).await?;

    Ok(Payload::json(user))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Payload<User>>> {
    if email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let user = state.users.get_user(&email).await?;
    Ok(Payload::json(user))
}

async fn missing_email() -> AppError {
    AppError::BadRequest("Email is required".to_string())
}
