// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Volunteer record, stored in Firestore under the email as document ID.
///
/// The same field names are used for the JSON API. Missing document fields
/// fall back to their defaults so records from older revisions still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Email address (also used as document ID)
    pub email: String,
    /// Full name as reported by LinkedIn
    pub name: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    /// Profile picture URL
    pub photo: String,

    // Enrollment form
    pub state: String,
    pub organization: String,
    pub years_of_experience: String,
    /// Comma-joined list
    pub volunteer_areas: String,
    /// Comma-joined list
    pub volunteer_means: String,
    pub convicted: bool,
    pub representation: String,
    pub provided_name: String,

    /// Set once the enrollment form has been accepted; never cleared.
    pub enrolled: bool,
    /// When the user registered (RFC 3339, UTC)
    pub created_at: String,
}
