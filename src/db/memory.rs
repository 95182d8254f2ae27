// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store for tests and offline runs.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::db::DocumentStore;
use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;
use dashmap::DashMap;

/// Document store backed by a concurrent map.
///
/// Counts successful writes and can be told to fail every write, which is
/// how the replication failure paths are exercised.
#[derive(Default)]
pub struct MemoryStore {
    label: String,
    docs: DashMap<String, User>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of writes that have succeeded.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Read a document directly, bypassing the trait.
    pub fn peek(&self, email: &str) -> Option<User> {
        self.docs.get(email).map(|doc| doc.clone())
    }

    /// Seed a document without counting it as a write.
    pub fn insert(&self, user: User) {
        self.docs.insert(user.email.clone(), user);
    }

    fn check_writable(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!(
                "{}: write rejected (injected failure)",
                self.label
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn label(&self) -> &str {
        &self.label
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.peek(email))
    }

    async fn set_user(&self, user: &User) -> Result<(), AppError> {
        self.check_writable()?;
        self.docs.insert(user.email.clone(), user.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update_fields(&self, user: &User, fields: &[&str]) -> Result<(), AppError> {
        self.check_writable()?;

        let mut doc = self.docs.get_mut(&user.email).ok_or_else(|| {
            AppError::Storage(format!("{}: no document for {}", self.label, user.email))
        })?;

        let source = serde_json::to_value(user).map_err(|e| AppError::Internal(e.into()))?;
        let mut target = serde_json::to_value(&*doc).map_err(|e| AppError::Internal(e.into()))?;

        if let (Some(source), Some(target)) = (source.as_object(), target.as_object_mut()) {
            for field in fields {
                if let Some(value) = source.get(*field) {
                    target.insert((*field).to_string(), value.clone());
                }
            }
        }

        *doc = serde_json::from_value(target).map_err(|e| AppError::Internal(e.into()))?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
