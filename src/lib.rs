// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Volunteer Registry: LinkedIn sign-up and enrollment for volunteers
//!
//! This crate provides the backend API that registers volunteers from their
//! LinkedIn profile and stores their enrollment in two Firestore accounts.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::UserStore;
use services::IdentityProvider;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserStore>,
    pub identity: Arc<dyn IdentityProvider>,
}
