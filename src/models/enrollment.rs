// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Enrollment form submitted by the client.

use serde::Deserialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Enrollment form body for `PUT /volunteering/users/{email}`.
///
/// Every field is optional on the wire so that a missing field can be
/// reported by name instead of as a JSON error.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EnrollmentForm {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<String>,
    #[serde(default)]
    pub volunteer_areas: Option<Vec<String>>,
    #[serde(default)]
    pub volunteer_means: Option<Vec<String>>,
    #[serde(default)]
    pub convicted: Option<bool>,
    #[serde(default)]
    pub representation: Option<String>,
    #[serde(default)]
    pub provided_name: Option<String>,
}
