// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper for one service account.

use std::path::Path;

use crate::db::DocumentStore;
use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;

/// Firestore database client bound to one project and one collection.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
    collection: String,
    label: String,
}

impl FirestoreDb {
    /// Connect using a service account key file.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST;
    /// the key file is then ignored.
    pub async fn from_service_account(
        label: &str,
        project_id: &str,
        key_file: &Path,
        collection: &str,
    ) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::new_emulator(label, project_id, collection).await;
        }

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());
        let client =
            firestore::FirestoreDb::with_options_service_account_key_file(options, key_file.into())
                .await
                .map_err(|e| {
                    AppError::Storage(format!("{}: failed to connect to Firestore: {}", label, e))
                })?;

        tracing::info!(store = label, project = project_id, "Connected to Firestore");

        Ok(Self {
            client,
            collection: collection.to_string(),
            label: label.to_string(),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    pub async fn new_emulator(
        label: &str,
        project_id: &str,
        collection: &str,
    ) -> Result<Self, AppError> {
        tracing::info!(store = label, "Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Storage(format!(
                "{}: failed to connect to Firestore Emulator: {}",
                label, e
            ))
        })?;

        tracing::info!(
            store = label,
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client,
            collection: collection.to_string(),
            label: label.to_string(),
        })
    }
}

#[async_trait]
impl DocumentStore for FirestoreDb {
    fn label(&self) -> &str {
        &self.label
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>, AppError> {
        tracing::debug!(store = %self.label, email, "Firestore: getting user");

        self.client
            .fluent()
            .select()
            .by_id_in(&self.collection)
            .obj()
            .one(email)
            .await
            .map_err(|e| AppError::Storage(format!("{}: failed to get user: {}", self.label, e)))
    }

    async fn set_user(&self, user: &User) -> Result<(), AppError> {
        tracing::debug!(store = %self.label, email = %user.email, "Firestore: writing user");

        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(&self.collection)
            .document_id(&user.email)
            .object(user)
            .execute()
            .await
            .map_err(|e| {
                AppError::Storage(format!("{}: failed to create user: {}", self.label, e))
            })?;
        Ok(())
    }

    /// Fails if the document does not exist; a masked write must never
    /// create a record that lacks its profile fields.
    async fn update_fields(&self, user: &User, fields: &[&str]) -> Result<(), AppError> {
        tracing::debug!(store = %self.label, email = %user.email, "Firestore: updating user");

        let _: () = self
            .client
            .fluent()
            .update()
            .fields(fields.iter())
            .in_col(&self.collection)
            .precondition(firestore::FirestoreWritePrecondition::Exists(true))
            .document_id(&user.email)
            .object(user)
            .execute()
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "{}: failed to update user data: {}",
                    self.label, e
                ))
            })?;
        Ok(())
    }
}
