// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod enrollment;
pub mod user;

pub use enrollment::EnrollmentForm;
pub use user::User;
