// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The two Firestore service accounts arrive as raw JSON documents in the
//! environment and are written to files before the store clients are built.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File names for the materialized service account credentials.
pub const SERVICE_ACCOUNT_1_FILE: &str = "service-account-1.json";
pub const SERVICE_ACCOUNT_2_FILE: &str = "service-account-2.json";

/// Whole-request budget when `REQUEST_TIMEOUT_SECS` is not set.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// LinkedIn OAuth client ID
    pub linkedin_client_id: String,
    /// LinkedIn OAuth client secret
    pub linkedin_client_secret: String,
    /// Credential document for the primary Firestore account
    pub service_account_1: String,
    /// Credential document for the secondary Firestore account
    pub service_account_2: String,
    /// Directory the credential documents are written to
    pub credentials_dir: PathBuf,
    /// Firestore collection holding user documents
    pub users_collection: String,
    /// Whole-request budget applied at the transport layer
    pub request_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            linkedin_client_id: "test_client_id".to_string(),
            linkedin_client_secret: "test_secret".to_string(),
            service_account_1: r#"{"project_id":"test-project-1"}"#.to_string(),
            service_account_2: r#"{"project_id":"test-project-2"}"#.to_string(),
            credentials_dir: PathBuf::from("."),
            users_collection: crate::db::collections::VOLUNTEERS.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            linkedin_client_id: env::var("CLIENT_ID")
                .map_err(|_| ConfigError::Missing("CLIENT_ID"))?,
            linkedin_client_secret: env::var("CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("CLIENT_SECRET"))?,
            service_account_1: env::var("SERVICE_ACCOUNT_1")
                .map_err(|_| ConfigError::Missing("SERVICE_ACCOUNT_1"))?,
            service_account_2: env::var("SERVICE_ACCOUNT_2")
                .map_err(|_| ConfigError::Missing("SERVICE_ACCOUNT_2"))?,
            credentials_dir: env::var("CREDENTIALS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            users_collection: env::var("USERS_COLLECTION")
                .unwrap_or_else(|_| crate::db::collections::VOLUNTEERS.to_string()),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        })
    }

    /// Write both service account documents into `credentials_dir`.
    pub fn write_service_accounts(&self) -> Result<ServiceAccountFiles, ConfigError> {
        let primary = write_credentials(
            &self.credentials_dir,
            SERVICE_ACCOUNT_1_FILE,
            &self.service_account_1,
        )?;
        let secondary = write_credentials(
            &self.credentials_dir,
            SERVICE_ACCOUNT_2_FILE,
            &self.service_account_2,
        )?;

        tracing::info!(
            primary = %primary.display(),
            secondary = %secondary.display(),
            "Service account credentials written"
        );

        Ok(ServiceAccountFiles { primary, secondary })
    }
}

/// Paths of the materialized credential files.
#[derive(Debug, Clone)]
pub struct ServiceAccountFiles {
    pub primary: PathBuf,
    pub secondary: PathBuf,
}

fn write_credentials(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, ConfigError> {
    let path = dir.join(file_name);
    std::fs::write(&path, contents).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[derive(serde::Deserialize)]
struct CredentialsDocument {
    project_id: String,
}

/// Extract the GCP project ID from a service account credential document.
pub fn project_id_from_credentials(contents: &str) -> Result<String, ConfigError> {
    let doc: CredentialsDocument = serde_json::from_str(contents)
        .map_err(|e| ConfigError::InvalidCredentials(e.to_string()))?;

    if doc.project_id.trim().is_empty() {
        return Err(ConfigError::InvalidCredentials(
            "project_id is empty".to_string(),
        ));
    }
    Ok(doc.project_id)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Failed to write credentials to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid service account credentials: {0}")]
    InvalidCredentials(String),
}
