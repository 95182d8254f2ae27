// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dual-write user store.
//!
//! Every mutation goes to the primary store and then to the secondary.
//! Reads only consult the primary. There is no transaction spanning the two:
//! if the secondary write fails the primary keeps the new data, the caller
//! gets an error, and nothing reconciles the stores afterwards. Divergence
//! is logged at error level so it can be repaired by hand.

use std::sync::Arc;

use crate::db::{DocumentStore, UserStore, ENROLLMENT_FIELDS};
use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;

/// [`UserStore`] that replicates writes across two [`DocumentStore`]s.
#[derive(Clone)]
pub struct ReplicatedUserStore {
    primary: Arc<dyn DocumentStore>,
    secondary: Arc<dyn DocumentStore>,
}

impl ReplicatedUserStore {
    pub fn new(primary: Arc<dyn DocumentStore>, secondary: Arc<dyn DocumentStore>) -> Self {
        Self { primary, secondary }
    }

    /// Report a secondary failure after the primary already committed.
    fn diverged(&self, email: &str, op: &str, err: AppError) -> AppError {
        tracing::error!(
            email,
            op,
            primary = self.primary.label(),
            secondary = self.secondary.label(),
            error = %err,
            "Secondary write failed after primary commit; stores have diverged"
        );
        err
    }
}

#[async_trait]
impl UserStore for ReplicatedUserStore {
    async fn create_user(&self, user: User) -> Result<User, AppError> {
        tracing::debug!(email = %user.email, "Creating user");

        if let Some(existing) = self.primary.get_user(&user.email).await? {
            tracing::debug!(email = %user.email, "User already exists, returning stored record");
            return Ok(existing);
        }

        self.primary.set_user(&user).await?;
        self.secondary
            .set_user(&user)
            .await
            .map_err(|e| self.diverged(&user.email, "create", e))?;

        tracing::info!(email = %user.email, "User created");
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, AppError> {
        tracing::debug!(email = %user.email, "Updating user");

        self.primary.update_fields(&user, ENROLLMENT_FIELDS).await?;
        self.secondary
            .update_fields(&user, ENROLLMENT_FIELDS)
            .await
            .map_err(|e| self.diverged(&user.email, "update", e))?;

        tracing::info!(email = %user.email, enrolled = user.enrolled, "User updated");
        Ok(user)
    }

    async fn get_user(&self, email: &str) -> Result<User, AppError> {
        tracing::debug!(email, "Getting user");

        self.primary
            .get_user(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User Account Not Found".to_string()))
    }
}
