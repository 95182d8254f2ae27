// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use volunteer_registry::config::Config;
use volunteer_registry::db::{MemoryStore, ReplicatedUserStore};
use volunteer_registry::error::AppError;
use volunteer_registry::routes::create_router;
use volunteer_registry::services::{IdentityProvider, Profile};
use volunteer_registry::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Identity provider that returns a canned profile, or fails when unset.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeIdentityProvider {
    profile: Mutex<Option<Profile>>,
    calls: Mutex<Vec<(String, String)>>,
    delay: Mutex<Option<Duration>>,
}

#[allow(dead_code)]
impl FakeIdentityProvider {
    pub fn set_profile(&self, profile: Option<Profile>) {
        *self.profile.lock().unwrap() = profile;
    }

    /// Stall every lookup for `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// (code, redirect_uri) pairs seen so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn resolve_profile(
        &self,
        auth_code: &str,
        redirect_uri: &str,
    ) -> Result<Profile, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((auth_code.to_string(), redirect_uri.to_string()));

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.profile
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::UpstreamAuth("HTTP 400: invalid_grant".to_string()))
    }
}

/// Handles for inspecting the offline test app.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub primary: Arc<MemoryStore>,
    pub secondary: Arc<MemoryStore>,
    pub identity: Arc<FakeIdentityProvider>,
}

/// A LinkedIn profile that passes validation.
#[allow(dead_code)]
pub fn test_profile(email: &str) -> Profile {
    Profile {
        email: email.to_string(),
        name: "James Bond".to_string(),
        photo: "https://media.licdn.com/800.jpg".to_string(),
        phone: String::new(),
    }
}

/// Create a test app backed by in-memory stores and a fake identity provider.
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    create_test_app_with_config(Config::default())
}

/// Same as [`create_test_app`], with caller-supplied configuration.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> TestApp {
    let primary = Arc::new(MemoryStore::new("primary"));
    let secondary = Arc::new(MemoryStore::new("secondary"));
    let identity = Arc::new(FakeIdentityProvider::default());

    let users = ReplicatedUserStore::new(primary.clone(), secondary.clone());

    let state = Arc::new(AppState {
        config,
        users: Arc::new(users),
        identity: identity.clone(),
    });

    TestApp {
        router: create_router(state),
        primary,
        secondary,
        identity,
    }
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
