// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! A [`DocumentStore`] is a single backing account (Firestore, or in-memory
//! for tests). A [`UserStore`] is what the handlers see; the production
//! implementation is [`ReplicatedUserStore`], which writes every mutation to
//! two document stores and reads from the first.

pub mod firestore;
pub mod memory;
pub mod replicated;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;
pub use replicated::ReplicatedUserStore;

use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const VOLUNTEERS: &str = "volunteers";
}

/// Fields written by an enrollment update. Profile fields and `created_at`
/// are never touched after creation.
pub const ENROLLMENT_FIELDS: &[&str] = &[
    "state",
    "organization",
    "years_of_experience",
    "volunteer_areas",
    "volunteer_means",
    "convicted",
    "representation",
    "provided_name",
    "enrolled",
];

/// One backing account holding user documents keyed by email.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short name used in logs and error messages.
    fn label(&self) -> &str;

    async fn get_user(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Write the full document.
    async fn set_user(&self, user: &User) -> Result<(), AppError>;

    /// Write only `fields` of `user` into the existing document.
    async fn update_fields(&self, user: &User, fields: &[&str]) -> Result<(), AppError>;
}

/// User record operations used by the request handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store a new user, or return the existing record for that email.
    async fn create_user(&self, user: User) -> Result<User, AppError>;

    /// Persist the enrollment fields of `user`.
    async fn update_user(&self, user: User) -> Result<User, AppError>;

    async fn get_user(&self, email: &str) -> Result<User, AppError>;
}
