// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Volunteer Registry API Server
//!
//! Registers volunteers through LinkedIn OAuth and records their enrollment
//! in two independent Firestore accounts.

use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use volunteer_registry::{
    config::{self, Config},
    db::{FirestoreDb, ReplicatedUserStore},
    services::LinkedInClient,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Volunteer Registry API");

    // Firestore clients read their credentials from files
    let files = config.write_service_accounts()?;

    let primary = FirestoreDb::from_service_account(
        "primary",
        &config::project_id_from_credentials(&config.service_account_1)?,
        &files.primary,
        &config.users_collection,
    )
    .await?;
    let secondary = FirestoreDb::from_service_account(
        "secondary",
        &config::project_id_from_credentials(&config.service_account_2)?,
        &files.secondary,
        &config.users_collection,
    )
    .await?;

    let users = ReplicatedUserStore::new(Arc::new(primary), Arc::new(secondary));

    let identity = LinkedInClient::new(
        config.linkedin_client_id.clone(),
        config.linkedin_client_secret.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        users: Arc::new(users),
        identity: Arc::new(identity),
    });

    let app = volunteer_registry::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server gracefully shut down");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("volunteer_registry=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
